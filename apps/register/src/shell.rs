//! # Register Shell
//!
//! Line-oriented operator interface over stdin/stdout.
//!
//! Each input line is parsed with clap (no binary name) into a
//! [`ShellCommand`], dispatched to the matching command function and
//! rendered as plain text. Errors are printed and the loop continues; only
//! `quit` (or end of input) ends the session.
//!
//! ```text
//! snack> add 1 2
//!   [1] Cheeseburger Deluxe     x2   R$ 37.80
//!   Subtotal R$ 37.80 | Discount R$ 0.00 | Total R$ 37.80
//! snack> cash-out 600 bank deposit
//! error: [INSUFFICIENT_FUNDS] Insufficient funds in drawer: ...
//! ```

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::commands::{cart, config, drawer, product, sale};
use crate::error::ApiError;
use crate::state::{ConfigState, JournalState, SessionState};
use snack_core::{Money, MovementDirection, PaymentMethod, VarianceKind};

const PROMPT: &str = "snack> ";

/// One parsed input line.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, name = "snack", disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Operator commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Search the menu by name
    Menu {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
        /// Name fragment
        term: Vec<String>,
    },
    /// List menu categories
    Categories,
    /// Add a product to the cart
    Add {
        id: String,
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set a cart line's quantity (0 removes it)
    Qty {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove { id: String },
    /// Set the sale discount
    Discount {
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,
    /// Finalize the sale (cash, card, instant-transfer)
    Checkout { method: PaymentMethod },
    /// Show the sales history
    Sales,
    /// Open the drawer with a float
    Open {
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },
    /// Put cash in the drawer
    CashIn {
        #[arg(allow_negative_numbers = true)]
        amount: Money,
        #[arg(required = true, trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Take cash out of the drawer
    CashOut {
        #[arg(allow_negative_numbers = true)]
        amount: Money,
        #[arg(required = true, trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Close the drawer against the counted cash
    Close {
        #[arg(allow_negative_numbers = true)]
        counted: Money,
        #[arg(trailing_var_arg = true)]
        note: Vec<String>,
    },
    /// Show the drawer
    Drawer,
    /// Show the configuration
    Config,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What handling one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line
    Empty,
    /// Text to show the operator
    Output(String),
    /// Operator asked to leave
    Quit,
}

/// The shell and the state its commands run against.
#[derive(Debug, Clone)]
pub struct Shell {
    config: ConfigState,
    session: SessionState,
    journal: JournalState,
}

impl Shell {
    pub fn new(config: ConfigState, session: SessionState, journal: JournalState) -> Self {
        Shell {
            config,
            session,
            journal,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        writeln!(
            output,
            "{} ready. Type 'help' for commands.",
            self.config.store_name
        )?;

        let mut lines = input.lines();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(output)?;
                break;
            };

            match self.handle_line(&line) {
                LineOutcome::Empty => {}
                LineOutcome::Output(text) => writeln!(output, "{}", text.trim_end())?,
                LineOutcome::Quit => break,
            }
        }

        writeln!(output, "Bye.")?;
        Ok(())
    }

    /// Parses and executes one line.
    pub fn handle_line(&self, line: &str) -> LineOutcome {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return LineOutcome::Empty;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            // Also covers `help`, which clap reports as an "error"
            Err(err) => return LineOutcome::Output(err.render().to_string()),
        };

        if command == ShellCommand::Quit {
            return LineOutcome::Quit;
        }

        debug!(?command, "shell command");
        match self.execute(command) {
            Ok(text) => LineOutcome::Output(text),
            Err(err) => {
                warn!(code = ?err.code, message = %err.message, "command rejected");
                LineOutcome::Output(format!("error: {}", err))
            }
        }
    }

    /// Dispatches a parsed command and renders its response.
    pub fn execute(&self, command: ShellCommand) -> Result<String, ApiError> {
        let session = &self.session;
        let journal = &self.journal;

        match command {
            ShellCommand::Menu { category, term } => {
                let products = product::search_menu(session, &term.join(" "), category.as_deref())?;
                Ok(self.render_menu(&products))
            }
            ShellCommand::Categories => Ok(product::list_categories(session).join("\n")),
            ShellCommand::Add { id, quantity } => {
                let cart = cart::add_to_cart(session, &id, Some(quantity))?;
                Ok(self.render_cart(&cart))
            }
            ShellCommand::Qty { id, quantity } => {
                let cart = cart::update_cart_item(session, &id, quantity)?;
                Ok(self.render_cart(&cart))
            }
            ShellCommand::Remove { id } => Ok(self.render_cart(&cart::remove_from_cart(session, &id))),
            ShellCommand::Discount { amount } => {
                let cart = cart::apply_discount(session, amount)?;
                Ok(self.render_cart(&cart))
            }
            ShellCommand::Cart => Ok(self.render_cart(&cart::get_cart(session))),
            ShellCommand::Clear => Ok(self.render_cart(&cart::clear_cart(session))),
            ShellCommand::Checkout { method } => {
                let response = sale::checkout(session, journal, method)?;
                Ok(self.render_checkout(&response))
            }
            ShellCommand::Sales => Ok(self.render_sales(&sale::list_sales(session))),
            ShellCommand::Open { amount } => {
                let response = drawer::open_drawer(session, amount)?;
                Ok(format!(
                    "Drawer opened with {}",
                    self.money(response.opening_float_cents)
                ))
            }
            ShellCommand::CashIn {
                amount,
                description,
            } => self.movement(MovementDirection::In, amount, &description),
            ShellCommand::CashOut {
                amount,
                description,
            } => self.movement(MovementDirection::Out, amount, &description),
            ShellCommand::Close { counted, note } => {
                let report = drawer::close_drawer(session, journal, counted, &note.join(" "))?;
                Ok(self.render_report(&report))
            }
            ShellCommand::Drawer => Ok(self.render_drawer(&drawer::get_drawer(session))),
            ShellCommand::Config => {
                let config = config::get_config(&self.config);
                serde_json::to_string_pretty(&config).map_err(|e| ApiError::internal(e.to_string()))
            }
            ShellCommand::Quit => Ok(String::new()),
        }
    }

    fn movement(
        &self,
        direction: MovementDirection,
        amount: Money,
        description: &[String],
    ) -> Result<String, ApiError> {
        let response = drawer::record_movement(
            &self.session,
            &self.journal,
            direction,
            amount,
            &description.join(" "),
        )?;
        Ok(format!(
            "Cash {} {} ({}). Balance {}",
            response.movement.direction,
            self.money(response.movement.amount_cents),
            response.movement.description,
            self.money(response.balance_cents)
        ))
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn money(&self, cents: i64) -> String {
        self.config.format_currency(Money::from_cents(cents))
    }

    fn render_menu(&self, products: &[product::ProductDto]) -> String {
        if products.is_empty() {
            return "No products found.".to_string();
        }
        let mut out = String::new();
        for p in products {
            let _ = writeln!(
                out,
                "  [{:>2}] {:<24} {:<10} {}",
                p.id,
                p.name,
                p.category,
                self.money(p.price_cents)
            );
        }
        out
    }

    fn render_cart(&self, cart: &cart::CartResponse) -> String {
        let mut out = String::new();
        if cart.items.is_empty() {
            out.push_str("Cart is empty.\n");
        }
        for item in &cart.items {
            let _ = writeln!(
                out,
                "  [{}] {:<24} x{:<4} {}",
                item.product_id,
                item.name,
                item.quantity,
                self.money(item.line_total_cents)
            );
        }
        let totals = &cart.totals;
        let _ = write!(
            out,
            "  Subtotal {} | Discount {} | Total {}",
            self.money(totals.subtotal_cents),
            self.money(totals.discount_cents),
            self.money(totals.total_cents)
        );
        out
    }

    fn render_checkout(&self, response: &sale::CheckoutResponse) -> String {
        let mut out = format!(
            "Sale {} finalized: {} item(s), total {} by {}",
            response.sale_id,
            response.item_count,
            self.money(response.total_cents),
            response.payment_method
        );
        if let Some(balance) = response.drawer_balance_cents {
            let _ = write!(out, "\nDrawer balance {}", self.money(balance));
        }
        out
    }

    fn render_sales(&self, response: &sale::SalesResponse) -> String {
        let mut out = String::new();
        for s in &response.sales {
            let _ = writeln!(
                out,
                "  {}  {:<16} {:>3} item(s)  {}",
                s.timestamp,
                s.payment_method.to_string(),
                s.item_count,
                self.money(s.total_cents)
            );
        }
        let summary = &response.summary;
        let _ = writeln!(
            out,
            "  {} sale(s): gross {} | discounts {} | net {}",
            summary.sale_count,
            self.config.format_currency(summary.gross),
            self.config.format_currency(summary.discounts),
            self.config.format_currency(summary.net)
        );
        for m in &summary.by_method {
            let _ = writeln!(
                out,
                "    {:<16} {:>3}  {}",
                m.method.to_string(),
                m.sale_count,
                self.config.format_currency(m.total)
            );
        }
        out
    }

    fn render_drawer(&self, d: &drawer::DrawerResponse) -> String {
        let mut out = format!(
            "Drawer {:?}: float {} | in {} | out {} | balance {}\n",
            d.status,
            self.money(d.opening_float_cents),
            self.money(d.total_in_cents),
            self.money(d.total_out_cents),
            self.money(d.balance_cents)
        );
        for m in &d.movements {
            let _ = writeln!(
                out,
                "  {:<3} {:>14}  {}",
                m.direction.to_string(),
                self.money(m.amount_cents),
                m.description
            );
        }
        out
    }

    fn render_report(&self, r: &drawer::ClosingReportDto) -> String {
        let verdict = match r.variance {
            VarianceKind::Balanced => "balanced",
            VarianceKind::Overage => "overage",
            VarianceKind::Shortage => "shortage",
        };
        let mut out = format!(
            "Drawer closed ({} movement(s))\n  Opening  {}\n  In       {}\n  Out      {}\n  Expected {}\n  Counted  {}\n  Variance {} ({})",
            r.movement_count,
            self.money(r.opening_float_cents),
            self.money(r.total_in_cents),
            self.money(r.total_out_cents),
            self.money(r.expected_cents),
            self.money(r.counted_cents),
            self.money(r.variance_cents),
            verdict
        );
        if !r.note.is_empty() {
            let _ = write!(out, "\n  Note     {}", r.note);
        }
        out
    }
}

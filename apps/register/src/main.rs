//! Snack POS register binary.

fn main() {
    if let Err(err) = snack_register::run() {
        eprintln!("snack-register: {}", err);
        std::process::exit(1);
    }
}

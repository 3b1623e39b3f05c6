use std::io::{self, Write};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const LOGO: [&str; 3] = [
    "╔═╗╦═╗╔═╗  ╔═╗╔═╗╦═╗╔═╗╔═╗",
    "╠╣ ╠╦╝║    ╠╣ ║ ║╠╦╝║ ╦║╣ ",
    "╚  ╩╚═╚═╝  ╚  ╚═╝╩╚═╚═╝╚═╝",
];

const TAGLINE: &str = "MSI/BIOSYM force field extraction";

/// The logo with tagline and version, as shown above `--help`.
pub fn banner() -> String {
    let mut out = String::from("\n");
    for row in LOGO {
        out.push_str("   ");
        out.push_str(row);
        out.push('\n');
    }
    out.push_str(&format!("   {TAGLINE}  ·  v{VERSION}\n"));
    out
}

pub fn print_banner() {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "\x1b[36m{}\x1b[0m", banner());
}

#![allow(nonstandard_style)]

mod error_handling;
mod evaluating;
mod parsing;
mod scanning;
mod session;

use session::*;

fn main() -> error_handling::Result<()> {
    env_logger::init();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    Session::new().run(stdin.lock(), &mut stdout)
}

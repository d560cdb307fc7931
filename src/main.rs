//! rTimebill main entrypoint.

use rtimebill::run;
use rtimebill::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

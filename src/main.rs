//! rPomodoro main entrypoint.

use rpomodoro::run;
use rpomodoro::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        if e.is_retryable() {
            error(format!("Error: {} (temporary failure, try again)", e));
        } else {
            error(format!("Error: {}", e));
        }
        std::process::exit(1);
    }
}

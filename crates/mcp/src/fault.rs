// Process-wide fault barrier

use std::any::Any;
use std::backtrace::Backtrace;

/// Exit status used when the server dies on a defect.
pub const PANIC_EXIT_CODE: i32 = 1;

/// Log panics through `tracing` and terminate the process.
///
/// A panic inside a spawned request task would otherwise be swallowed by
/// tokio and leave the client waiting on a response that never comes.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(
            payload = %panic_message(info.payload()),
            location = %info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            backtrace = %Backtrace::force_capture(),
            "Fatal error, shutting down"
        );
        std::process::exit(PANIC_EXIT_CODE);
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&"owned".to_string()), "owned");
        assert_eq!(panic_message(&42u8), "non-string panic payload");
    }
}

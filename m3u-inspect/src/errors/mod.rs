// Logs an error where it happens and passes it on unchanged
#[macro_export]
macro_rules! error_with_log {
    ($position:expr) => {
        |e| {
            use log::error;

            error!("{}: {}", $position, e);
            e
        }
    };
}

pub use error_with_log;

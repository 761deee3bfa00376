/// Sink for messages addressed to the user.
pub trait Ui {
    /// Shows progress `message`.
    fn write_message(&self, message: &str);

    /// Shows error `message` and terminates the program.
    fn app_error(&self, message: &str) -> !;
}

/// Prints messages to the standard output and errors to the standard error.
/// [`Ui::app_error`] exits the process with status `1`.
#[derive(Clone, Copy, Default, Debug)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn write_message(&self, message: &str) {
        println!("{message}");
    }

    fn app_error(&self, message: &str) -> ! {
        eprintln!("{message}");
        std::process::exit(1)
    }
}

/// Like [`ConsoleUi`], but does not print progress messages.
#[derive(Clone, Copy, Default, Debug)]
pub struct QuietUi;

impl Ui for QuietUi {
    #[inline] fn write_message(&self, _message: &str) {}

    fn app_error(&self, message: &str) -> ! {
        ConsoleUi.app_error(message)
    }
}

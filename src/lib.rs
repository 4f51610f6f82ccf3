pub mod config;
pub mod poller;
pub mod practicum;
pub mod status;
pub mod telegram;

pub use config::Config;
pub use poller::{polling_loop, run_cycle, NotificationState, Notifier, StatusSource};
pub use practicum::{check_response, ApiResponse, PollError, PracticumClient};
pub use status::{parse_status, HomeworkVerdict};
pub use telegram::TelegramClient;

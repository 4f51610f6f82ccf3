use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::interval;
use tracing::{debug, error, warn};

use crate::practicum::{ApiResponse, PollError};
use crate::status::parse_status;

/// Source of homework review statuses.
///
/// Implementations fetch and validate every status change at or after
/// `from_date`.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn homework_statuses(&self, from_date: u64) -> Result<ApiResponse, PollError>;
}

/// Outbound notification transport.
///
/// Delivery is best-effort from the poller's perspective: failures are
/// logged and never reach the cycle's error path.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

/// Last-sent message caches used to suppress consecutive duplicate
/// notifications. Held in memory only; a restart resets both.
#[derive(Debug, Default)]
pub struct NotificationState {
    pub last_status: String,
    pub last_error: String,
}

/// Run polling cycles forever. The only exit is process termination.
pub async fn polling_loop<S, N>(source: &S, notifier: &N, poll_interval: Duration)
where
    S: StatusSource,
    N: Notifier,
{
    let mut cursor = now_secs();
    let mut state = NotificationState::default();
    let mut interval = interval(poll_interval);

    loop {
        interval.tick().await;
        cursor = run_cycle(source, notifier, cursor, &mut state).await;
    }
}

/// One fetch–validate–notify cycle.
///
/// Returns the cursor for the next cycle: the server's `current_date` on
/// success, the previous cursor unchanged on any error. An errored window
/// is re-requested on the next poll.
pub async fn run_cycle<S, N>(
    source: &S,
    notifier: &N,
    cursor: u64,
    state: &mut NotificationState,
) -> u64
where
    S: StatusSource,
    N: Notifier,
{
    match poll_once(source, cursor).await {
        Ok((Some(message), current_date)) => {
            if message != state.last_status {
                deliver(notifier, &message).await;
                state.last_status = message;
            } else {
                debug!("status unchanged, suppressing duplicate notification");
            }
            advance(cursor, current_date)
        }
        Ok((None, current_date)) => {
            debug!("no new homework statuses");
            advance(cursor, current_date)
        }
        Err(e) => {
            error!("polling cycle failed: {}", e);
            let message = format!("Сбой в работе программы: {}", e);
            if message != state.last_error {
                deliver(notifier, &message).await;
                state.last_error = message;
            } else {
                debug!("error unchanged, suppressing duplicate notification");
            }
            cursor
        }
    }
}

/// Fetch and extract the status message for the latest submission, if any.
/// Submissions beyond the first are ignored.
async fn poll_once<S>(source: &S, cursor: u64) -> Result<(Option<String>, Option<u64>), PollError>
where
    S: StatusSource,
{
    let response = source.homework_statuses(cursor).await?;

    let message = match response.homeworks.first() {
        Some(homework) => Some(parse_status(homework)?),
        None => None,
    };

    Ok((message, response.current_date))
}

fn advance(cursor: u64, current_date: Option<u64>) -> u64 {
    match current_date {
        Some(next) => next,
        None => {
            warn!("response carried no usable current_date, keeping cursor at {}", cursor);
            cursor
        }
    }
}

async fn deliver<N: Notifier>(notifier: &N, text: &str) {
    match notifier.notify(text).await {
        Ok(()) => debug!("sent notification: \"{}\"", text),
        Err(e) => error!("failed to deliver notification: {:#}", e),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

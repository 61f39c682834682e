//! Defines the Tweenkit runtime task runner.
use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::OnceCell;
use tokio::task;
use tokio::task::JoinHandle;

use crate::errors::{Error, RuntimeError, Unknown};

/// Represents the result of a task.
/// A task may return either () or Result<(), Error> for flexibility which
/// will be converted to TaskResult sent to the runtime.
pub enum TaskResult {
    Ok,
    Err(Error),
}

/// Handle to a task spawned through [`run`]: abort it to stop the task early.
pub type TaskHandler = JoinHandle<Result<(), Error>>;

/// Globally accessible runtime transmitter(TX)/receiver(RX) (not initialised yet)
pub static RUNTIME_TX: OnceCell<Mutex<Option<UnboundedSender<UnboundedReceiver<TaskResult>>>>> =
    OnceCell::const_new();
pub static RUNTIME_RX: OnceCell<Mutex<Option<UnboundedReceiver<UnboundedReceiver<TaskResult>>>>> =
    OnceCell::const_new();

impl From<Result<(), Error>> for TaskResult {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(_) => TaskResult::Ok,
            Err(e) => TaskResult::Err(e),
        }
    }
}

impl From<()> for TaskResult {
    fn from(_: ()) -> Self {
        TaskResult::Ok
    }
}

/// Initializes the global task channel used by the runtime.
///
/// Called by the `#[tweenkit::runtime]` and `#[tweenkit::test]` macros before the
/// function body runs.
pub async fn init_task_channel() {
    // If no receiver is configured, create a new one (with associated sender).
    RUNTIME_RX
        .get_or_init(|| async {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<UnboundedReceiver<TaskResult>>();

            // Set the runtime sender.
            RUNTIME_TX
                .get_or_init(|| async { Mutex::new(Some(tx)) })
                .await;

            // Set the runtime receiver.
            Mutex::new(Some(rx))
        })
        .await;
}

/// Runs a given future as a Tokio task while ensuring the main function (marked by
/// `#[tweenkit::runtime]`) will not finish before all running tasks are done.
/// This is done by using a globally accessible channel to communicate the handlers to be
/// waited on by the runtime.
///
/// # Parameters
/// * `future`: A future that implements `Future<Output = ()>`, `Send`, and has a `'static` lifetime.
///
/// # Errors
/// Returns an error if the sender is not initialized or if sending the task handle fails.
///
/// # Example
/// ```
/// use tweenkit::utils::task;
///
/// #[tweenkit::runtime]
/// async fn main() {
///     task::run(async move {
///         // whatever
///     }).unwrap();
/// }
/// ```
pub fn run<F, T>(future: F) -> Result<TaskHandler, Error>
where
    F: Future<Output = T> + Send + 'static,
    T: Into<TaskResult> + Send + 'static,
{
    // Create a transmitter(tx)/receiver(rx) unique to this task.
    let (task_tx, task_rx) = tokio::sync::mpsc::unbounded_channel();

    // --
    // Create a task to run our future: note how we capture the tx...
    let handler = task::spawn(async move {
        // ...to send the result of the future through that channel.
        let result = future.await.into();
        task_tx.send(result).map_err(|err| Unknown {
            info: err.to_string(),
        })?;
        Ok(())
    });

    // --
    // Send the receiver(rx) side of the task-channel to the runtime.

    let cell = RUNTIME_TX.get().ok_or(RuntimeError)?;
    let mut lock = cell.lock();
    let runtime_tx = lock.as_mut().ok_or(RuntimeError)?;

    runtime_tx.send(task_rx).map_err(|err| Unknown {
        info: err.to_string(),
    })?;

    Ok(handler)
}

/// Waits until every task spawned through [`run`] has completed.
///
/// Called by the `#[tweenkit::runtime]` and `#[tweenkit::test]` macros after the
/// function body runs. Failed tasks are reported on stderr, they do not abort the
/// runtime.
pub async fn wait_for_all_tasks() {
    let cell = match RUNTIME_RX.get() {
        Some(cell) => cell,
        None => return,
    };
    let mut lock = cell.lock();
    let receiver = match lock.as_mut() {
        Some(receiver) => receiver,
        None => return,
    };

    while receiver.len() > 0 {
        // We receive the task specific receiver.
        if let Some(mut task_receiver) = receiver.recv().await {
            // We receive the task result through that new receiver.
            if let Some(task_result) = task_receiver.recv().await {
                match task_result {
                    TaskResult::Ok => {}
                    TaskResult::Err(err) => eprintln!("Task failed: {:?}", err.to_string()),
                }
            }
        }
    }
}

#[macro_export]
macro_rules! pause {
    ($ms:expr) => {
        tokio::time::sleep(tokio::time::Duration::from_millis($ms as u64)).await
    };
}

#[macro_export]
macro_rules! pause_sync {
    ($ms:expr) => {
        std::thread::sleep(std::time::Duration::from_millis($ms as u64))
    };
}

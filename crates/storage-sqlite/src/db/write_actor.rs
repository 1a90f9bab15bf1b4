use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use finboard_core::errors::{Error, Result};
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyResult = Result<Box<dyn Any + Send + 'static>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>,
}

fn writer_gone(detail: &str) -> Error {
    StorageError::WriterUnavailable(detail.to_string()).into()
}

impl WriteHandle {
    /// Runs `job` on the writer's connection inside an immediate transaction.
    /// The transaction is rolled back when the job returns an error.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("writer task has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("writer dropped the reply"))??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_gone("unexpected result type from writer"))
    }
}

/// Spawns the task that owns one pooled connection and applies write jobs
/// one at a time.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) =
        mpsc::channel::<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                let message = format!("no database connection: {}", e);
                error!("Writer could not start: {}", message);
                // Fail every queued job instead of leaving callers waiting
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(writer_gone(&message)));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: AnyResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // Receiver may be gone if the request was cancelled
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use diesel::RunQueryDsl;
    use tempfile::tempdir;

    #[tokio::test]
    async fn failed_jobs_roll_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("writer.db").to_string_lossy().to_string();
        let pool = create_pool(&path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());

        let result: Result<()> = writer
            .exec(|conn| {
                diesel::sql_query(
                    "INSERT INTO categories (name, type) VALUES ('Rollback', 'EXPENSE')",
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Err(Error::invalid_input("abort"))
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let count: i64 = writer
            .exec(|conn| {
                use crate::schema::categories::dsl::*;
                use diesel::prelude::*;
                categories
                    .count()
                    .get_result(conn)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}

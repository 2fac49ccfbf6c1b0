use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Connection, Pool};

use crate::domain::repository::TokenStore;
use crate::domain::types::{ConsumeResult, store_key};
use crate::error::VerificationError;

/// Deletes KEYS[1] only when it holds ARGV[1].
/// Returns 1 when deleted, 0 when absent, -1 when the value differs.
const CONSUME_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return 0
end
if current == ARGV[1] then
    redis.call('DEL', KEYS[1])
    return 1
end
return -1
"#;

#[derive(Clone)]
pub struct RedisTokenStore {
    pub pool: Pool,
}

impl RedisTokenStore {
    async fn conn(&self) -> Result<Connection, VerificationError> {
        self.pool
            .get()
            .await
            .map_err(|e| VerificationError::Store(e.into()))
    }
}

fn store_err(e: redis::RedisError) -> VerificationError {
    VerificationError::Store(e.into())
}

/// Maps the reply of [`CONSUME_SCRIPT`].
fn consume_result(reply: i64) -> ConsumeResult {
    match reply {
        1 => ConsumeResult::Deleted,
        0 => ConsumeResult::Absent,
        _ => ConsumeResult::Different,
    }
}

impl TokenStore for RedisTokenStore {
    async fn store(&self, email: &str, token: &str, ttl_secs: u64) -> Result<(), VerificationError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(store_key(email), token, ttl_secs)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn store_if_absent(
        &self,
        email: &str,
        token: &str,
        ttl_secs: u64,
    ) -> Result<bool, VerificationError> {
        let mut conn = self.conn().await?;
        // SET NX EX replies OK when written and nil when the key exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(store_key(email))
            .arg(token)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;
        Ok(reply.is_some())
    }

    async fn load(&self, email: &str) -> Result<Option<String>, VerificationError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn.get(store_key(email)).await.map_err(store_err)?;
        Ok(value)
    }

    async fn consume(&self, email: &str, token: &str) -> Result<ConsumeResult, VerificationError> {
        let mut conn = self.conn().await?;
        let reply: i64 = redis::cmd("EVAL")
            .arg(CONSUME_SCRIPT)
            .arg(1)
            .arg(store_key(email))
            .arg(token)
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;
        Ok(consume_result(reply))
    }

    async fn ping(&self) -> Result<(), VerificationError> {
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

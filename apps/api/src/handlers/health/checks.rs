use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::dependency_status;
use crate::dto::HealthDependencyStatus;

pub(super) async fn check_redis(connection: Option<ConnectionManager>) -> HealthDependencyStatus {
    let Some(mut connection) = connection else {
        return dependency_status("disabled", None);
    };

    match connection.ping::<String>().await {
        Ok(value) if value.eq_ignore_ascii_case("pong") => dependency_status("ok", None),
        Ok(value) => dependency_status(
            "error",
            Some(format!("unexpected redis ping response: {value}")),
        ),
        Err(error) => dependency_status("error", Some(format!("redis ping failed: {error}"))),
    }
}

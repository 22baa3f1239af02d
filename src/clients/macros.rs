/// Await a store call, logging any [`FrameworkError`](crate::error::FrameworkError)
/// and converting it into a sanitized [`UserError`](crate::user_actor::UserError).
macro_rules! store_call {
    ($operation:literal, $call:expr) => {
        $call
            .await
            .map_err(|e| $crate::clients::sanitize_store_error($operation, e))
    };
}

/***************************************/
/*               Macros                */
/***************************************/

/// Process exit status when the building cannot be set up.
pub const SETUP_FAILURE: i32 = 1;

/**
 * Evaluates a setup step that returns a `Result`.
 *
 * On `Ok` the value is returned. On `Err` the error is logged together with the name
 * of the step, and the process exits with `SETUP_FAILURE`. Only meant for `main`,
 * before the console loop has started.
 *
 * ```ignore
 * let config = exit_on_error!(config::load_config(path), "loading configuration");
 * ```
 */
#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $step:expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                log::error!("{} failed: {}", $step, err);
                std::process::exit($crate::shared::macros::SETUP_FAILURE);
            }
        }
    };
    ($result:expr) => {
        $crate::exit_on_error!($result, "setup")
    };
}

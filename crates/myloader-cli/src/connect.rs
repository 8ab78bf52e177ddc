//! Resolves the effective [`ConnectionParams`] from CLI flags, prompting
//! for a password when `--ask-password` is set (spec §6).

use myloader_db::ConnectionParams;

use crate::cli::ConnectionArgs;

/// Builds connection parameters, prompting interactively for a password
/// when `--ask-password` is set, otherwise using `--password` verbatim
/// (which may be `None`, for a passwordless account).
pub fn resolve(args: &ConnectionArgs) -> anyhow::Result<ConnectionParams> {
    let password = if args.ask_password {
        Some(rpassword::prompt_password("Enter password: ")?)
    } else {
        args.password.clone()
    };
    Ok(ConnectionParams {
        host: args.host.clone(),
        port: args.port,
        user: args.user.clone(),
        password,
        socket: args.socket.clone(),
    })
}

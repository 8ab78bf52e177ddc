//! Masks password-bearing argv substrings before they ever reach a log
//! line or panic message (spec §6).
//!
//! This redacts the command line we echo into our own logs. It does not
//! rewrite the OS-visible process title the way a C binary can by
//! overwriting its `argv` memory in place -- that requires raw access to
//! the process's original argument vector that a hosted Rust `main` never
//! receives, and isn't worth reaching for `libc` over. A password passed
//! on the command line remains visible to `ps` for the process's
//! lifetime; `--ask-password` avoids that entirely.

/// Returns a copy of `args` with the value following `--password`/`-p`,
/// and the value half of `--password=...`, replaced by `X`s of the same
/// length.
pub fn redact_for_display(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut redact_next = false;
    for arg in args {
        if redact_next {
            out.push("X".repeat(arg.len()));
            redact_next = false;
            continue;
        }
        if arg == "--password" || arg == "-p" {
            redact_next = true;
            out.push(arg.clone());
            continue;
        }
        if let Some(value) = arg.strip_prefix("--password=") {
            out.push(format!("--password={}", "X".repeat(value.len())));
            continue;
        }
        out.push(arg.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn redacts_separate_password_flag() {
        let input = args(&["myloader-rs", "-d", "/dump", "--password", "hunter2"]);
        let out = redact_for_display(&input);
        assert_eq!(out[4], "XXXXXXX");
    }

    #[test]
    fn redacts_short_password_flag() {
        let input = args(&["myloader-rs", "-p", "hunter2"]);
        let out = redact_for_display(&input);
        assert_eq!(out[2], "XXXXXXX");
    }

    #[test]
    fn redacts_inline_password_assignment() {
        let input = args(&["myloader-rs", "--password=hunter2"]);
        let out = redact_for_display(&input);
        assert_eq!(out[1], "--password=XXXXXXX");
    }

    #[test]
    fn leaves_everything_else_untouched() {
        let input = args(&["myloader-rs", "-d", "/dump", "--threads", "4"]);
        assert_eq!(redact_for_display(&input), input);
    }
}

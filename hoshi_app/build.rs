use std::path::PathBuf;
use std::process::Command;

macro_rules! warn_and_return {
    ($($t:tt)*) => {{
        println!("cargo::warning={}", format_args!($($t)*));
        return;
    }};
}

fn main() {
    println!("cargo::rerun-if-changed=Cargo.toml");
    include_git_commit_hash();
}

/// Sets `GIT_HASH` for the crate's compilation, or prints a warning.
fn include_git_commit_hash() {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD", "--symbolic-full-name", "HEAD", "--show-toplevel"])
        .output();

    let output = match output {
        Ok(output) if output.status.success() => output,
        Ok(_) => warn_and_return!("`git rev-parse` exited with non-success error code"),
        Err(why) => warn_and_return!("cannot find git commit hash: {why}"),
    };

    let Ok(output) = String::from_utf8(output.stdout) else {
        warn_and_return!("`git rev-parse` output is invalid utf-8");
    };

    let mut lines = output.lines();
    let (Some(git_hash), Some(git_ref), Some(git_root), None) =
        (lines.next(), lines.next(), lines.next(), lines.next())
    else {
        warn_and_return!("unexpected `git rev-parse` output");
    };

    println!("cargo::rustc-env=GIT_HASH={git_hash}");

    let git_dir = PathBuf::from(git_root).join(".git");
    println!("cargo::rerun-if-changed={}", git_dir.join("HEAD").display());

    if git_ref != "HEAD" {
        println!("cargo::rerun-if-changed={}", git_dir.join(git_ref).display());
    }
}

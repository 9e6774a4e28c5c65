use std::process::Command;

fn capture(cmd: &str, args: &[&str]) -> Option<String> {
    Command::new(cmd)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    let sha = capture("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_GIT_SHA={sha}");

    let dirty = Command::new("git")
        .args(["diff", "--quiet"])
        .status()
        .map(|s| if s.success() { "" } else { "-dirty" })
        .unwrap_or("");
    println!("cargo:rustc-env=BUILD_GIT_DIRTY={dirty}");

    let date = capture("date", &["-u", "+%Y-%m-%d"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_DATE={date}");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
}

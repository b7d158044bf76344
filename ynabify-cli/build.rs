use std::path::Path;
use std::process::Command;

fn git(workspace: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(args)
        .output()
        .ok()?;
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (out.status.success() && !text.is_empty()).then(|| text.to_string())
}

fn main() {
    let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into());
    let workspace = Path::new(&manifest_dir).join("..");

    // Rebuild when HEAD moves.
    if let Some(head) = git(&workspace, &["rev-parse", "--git-path", "HEAD"]) {
        println!("cargo:rerun-if-changed={}", workspace.join(head).display());
    }

    let describe = git(&workspace, &["describe", "--always", "--dirty", "--abbrev=10"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=YNABIFY_BUILD_SHA={describe}");
}

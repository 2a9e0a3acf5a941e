// CLASSIFICATION: COMMUNITY
// Filename: build.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

fn main() {
    use std::env;

    println!("cargo:rerun-if-env-changed=ODMCHECK_DEFAULT_MODE");

    let mode = env::var("ODMCHECK_DEFAULT_MODE").unwrap_or_else(|_| "warn".into());
    match mode.as_str() {
        "warn" | "enforce" => {}
        other => {
            println!("cargo:warning=unknown ODMCHECK_DEFAULT_MODE {other:?}; using warn");
            println!("cargo:rustc-env=ODMCHECK_DEFAULT_MODE=warn");
            return;
        }
    }
    if mode == "enforce" {
        println!("cargo:warning=odmcheck defaults to enforce mode");
    }
    println!("cargo:rustc-env=ODMCHECK_DEFAULT_MODE={mode}");
}

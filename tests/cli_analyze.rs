mod common;

use common::{stdout, TestEnv};

#[test]
fn analyze_reports_framework_build_and_env() {
    let env = TestEnv::new();
    env.write(
        "package.json",
        r#"{"name":"site","scripts":{"build":"next build"},"dependencies":{"next":"14.2.0"}}"#,
    );
    env.write(".env", "PORT=8080\n");

    let output = env.run(&["analyze"]);
    let out = stdout(&output);

    assert!(output.status.success(), "{}", out);
    assert!(out.contains("Project:        site"));
    assert!(out.contains("Framework:      Next.js"));
    assert!(out.contains("Strategy:       vercel"));
    assert!(out.contains("Build command:  npm run build"));
    assert!(out.contains("Env files:      .env"));
    assert!(out.contains("VERCEL_TOKEN"));
    assert!(out.contains("(required)"));
    assert!(out.contains("8080"));
}

#[test]
fn analyze_token_from_env_file_is_masked() {
    let env = TestEnv::new();
    env.write("package.json", r#"{"name":"site"}"#);
    env.write(".env.local", "VERCEL_TOKEN=abcdefghijklmnopqrstuvwxyz\n");

    let out = stdout(&env.run(&["analyze"]));

    assert!(out.contains("****wxyz"));
    assert!(!out.contains("abcdefghijklmnop"));
}

#[test]
fn analyze_without_manifest_does_not_fail() {
    let env = TestEnv::new();

    let output = env.run(&["analyze"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("no package.json"));
}

mod common;

use common::{stdout, TestEnv};

#[test]
fn help_topics_guide() {
    let env = TestEnv::new();
    let output = env.run(&["help-topics"]);

    assert!(output.status.success());
    insta::assert_snapshot!("help_topics", stdout(&output));
}

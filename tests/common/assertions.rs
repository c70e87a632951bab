/// FFmpeg argument assertion utilities
#[allow(dead_code)]
pub fn assert_cmd_contains(cmd: &str, flag: &str) {
    assert!(
        cmd.contains(flag),
        "Expected FFmpeg command to contain '{}' but it didn't.\nCommand: {}",
        flag,
        cmd
    );
}

/// Check if a command string does NOT contain a specific flag
#[allow(dead_code)]
pub fn assert_cmd_not_contains(cmd: &str, flag: &str) {
    assert!(
        !cmd.contains(flag),
        "Expected FFmpeg command to NOT contain '{}' but it did.\nCommand: {}",
        flag,
        cmd
    );
}

/// Check that `flag` is immediately followed by `value` in an argument list
#[allow(dead_code)]
pub fn assert_arg_value(args: &[String], flag: &str, value: &str) {
    let found = args
        .windows(2)
        .any(|pair| pair[0] == flag && pair[1] == value);
    assert!(
        found,
        "Expected '{} {}' in arguments but it wasn't there.\nArgs: {:?}",
        flag, value, args
    );
}

/// Check that no string in the plan contains `needle`
#[allow(dead_code)]
pub fn assert_plan_free_of(plan: &letterbox720::engine::TranscodePlan, needle: &str) {
    for s in plan
        .decode_args
        .iter()
        .chain(&plan.encode_args)
        .chain(&plan.trace_log)
    {
        assert!(
            !s.contains(needle),
            "Plan string {:?} contains '{}'.\nPlan: {:#?}",
            s,
            needle,
            plan
        );
    }
}

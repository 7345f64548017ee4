//! Rule list assembly.

/// Merge the decoded gfwlist with the builtin and user rule lists.
///
/// Lines keep their order: gfwlist first, then builtin rules, then user
/// rules when provided.
pub fn combine_lists(gfwlist: &str, builtin: &str, user_rule: Option<&str>) -> Vec<String> {
    let mut rules: Vec<String> = gfwlist.lines().map(str::to_string).collect();
    rules.extend(builtin.lines().map(str::to_string));

    if let Some(user_rule) = user_rule {
        rules.extend(user_rule.lines().map(str::to_string));
    }

    rules
}

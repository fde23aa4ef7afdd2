use once_cell::sync::Lazy;

use crate::spec::Catalog;

/// Raw JSON of the built-in security policy catalog.
pub const SECURITY_POLICY_JSON: &str = include_str!("../catalogs/security-policy.json");

static SECURITY_POLICY: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json_str(SECURITY_POLICY_JSON)
        .expect("embedded catalogs/security-policy.json is a valid catalog")
});

/// The security policy questionnaire shipped with the crate.
pub fn security_policy() -> &'static Catalog {
    &SECURITY_POLICY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn builtin_catalog_has_no_issues() {
        let catalog = security_policy();
        assert_eq!(catalog.len(), 4);
        let report = validate(catalog);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn commercial_support_gates_the_flow() {
        let question = security_policy()
            .question("commercial-support")
            .expect("gating question");
        assert!(question.allows_continuation("paid"));
        assert!(question.allows_continuation("designed"));
        assert!(!question.allows_continuation("implicit"));
        assert_eq!(
            question.option("no").and_then(|o| o.exit_message.as_deref()),
            Some("I owe you nothing")
        );
    }
}

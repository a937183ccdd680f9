//! Built-in reference scenario
//!
//! The onboarding smoke flow: admin login, company creation directly against
//! the company service and again through the gateway, API-key issuance for
//! whichever company creation produced an id, then authentication with the
//! issued key pair. The same document ships as `scenarios/onboarding.yaml`
//! for standalone use.

use std::sync::LazyLock;

use super::step::Scenario;

const ONBOARDING_YAML: &str = include_str!("../../scenarios/onboarding.yaml");

static ONBOARDING: LazyLock<Scenario> =
    LazyLock::new(|| serde_yaml::from_str(ONBOARDING_YAML).expect("built-in scenario parses"));

/// The admin onboarding smoke scenario.
pub fn onboarding_smoke() -> Scenario {
    ONBOARDING.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_shape() {
        let scenario = onboarding_smoke();
        assert_eq!(scenario.name, "fluxo-1-onboarding");
        assert_eq!(scenario.steps.len(), 5);

        let names: Vec<_> = scenario.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "authenticate-admin",
                "create-company-direct",
                "create-company-gateway",
                "issue-api-key",
                "authenticate-api-key",
            ]
        );
    }

    #[test]
    fn test_only_login_is_fatal() {
        let scenario = onboarding_smoke();
        let fatal: Vec<_> = scenario
            .steps
            .iter()
            .filter(|s| s.fatal)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(fatal, vec!["authenticate-admin"]);
    }

    #[test]
    fn test_api_key_step_prefers_direct_company_id() {
        let scenario = onboarding_smoke();
        let step = scenario
            .steps
            .iter()
            .find(|s| s.name == "issue-api-key")
            .unwrap();

        let company = step
            .requires
            .iter()
            .find(|r| r.alias == "companyId")
            .unwrap();
        let candidates: Vec<_> = company.candidates().collect();
        assert_eq!(candidates, vec!["companyId", "gatewayCompanyId"]);
    }

    #[test]
    fn test_api_key_token_does_not_shadow_admin_token() {
        let scenario = onboarding_smoke();
        let step = scenario
            .steps
            .iter()
            .find(|s| s.name == "authenticate-api-key")
            .unwrap();

        assert_eq!(step.outputs.len(), 1);
        assert_eq!(step.outputs[0].name, "apiKeyAccessToken");
        assert_eq!(step.outputs[0].field.as_deref(), Some("accessToken"));
    }
}

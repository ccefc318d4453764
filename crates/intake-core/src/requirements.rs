//! The requirement table shared by validation and progress.
//!
//! Each row names one answer, the section it belongs to, the gate that makes it
//! relevant and whether it must be filled before submission. Keys match the
//! field names drivers accept so a listing doubles as a map of editable fields.

use std::fmt;

use intake_domain::{AnswerSet, LabelledOption, OperationType, Section};

use crate::visibility::{has_intermediary_selection, is_app_related, Visibility};

/// Conditions under which a requirement becomes relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    AppRelated,
    SellersJsonHosted,
    OperationIncludesResale,
    IntermediarySelected,
    PricingStrategyImplemented,
    ScanningConducted,
    CookieTableHosted,
    DataPointsRequired,
    EidsSupported,
    MappingRequired,
    RevenueCapsInPlace,
}

impl Gate {
    pub fn holds(self, answers: &AnswerSet) -> bool {
        let ortb = &answers.ortb_technical;
        let inventory = &answers.ctv_app_technical.technical_settings.inventory_management;
        match self {
            Gate::Always => true,
            Gate::AppRelated => is_app_related(answers),
            Gate::SellersJsonHosted => answers.has_sellers_json,
            Gate::OperationIncludesResale => matches!(answers.operation_type, Some(OperationType::Both)),
            Gate::IntermediarySelected => has_intermediary_selection(answers),
            Gate::PricingStrategyImplemented => answers.web_technical.pricing_strategy.implementing,
            Gate::ScanningConducted => ortb.ad_quality.conducts_scanning,
            Gate::CookieTableHosted => ortb.cookie_matching.can_host_table,
            Gate::DataPointsRequired => ortb.cookie_matching.requires_data_points,
            Gate::EidsSupported => ortb.cookie_matching.supports_eids,
            Gate::MappingRequired => inventory.requires_mapping,
            Gate::RevenueCapsInPlace => inventory.has_revenue_caps,
        }
    }
}

/// One row of the requirement table.
#[derive(Clone, Copy)]
pub struct Requirement {
    pub key: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub gate: Gate,
    pub required: bool,
    pub check: fn(&AnswerSet) -> bool,
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("key", &self.key)
            .field("section", &self.section)
            .field("gate", &self.gate)
            .field("required", &self.required)
            .finish()
    }
}

impl Requirement {
    /// Shown when its section is shown and its gate holds.
    pub fn is_visible(&self, answers: &AnswerSet, visibility: &Visibility) -> bool {
        visibility.shows(self.section) && self.gate.holds(answers)
    }

    pub fn is_required(&self, answers: &AnswerSet, visibility: &Visibility) -> bool {
        self.required && self.is_visible(answers, visibility)
    }

    pub fn is_satisfied(&self, answers: &AnswerSet) -> bool {
        (self.check)(answers)
    }
}

/// Requirements visible for the current answers, in table order.
pub fn visible_fields(answers: &AnswerSet) -> Vec<&'static Requirement> {
    let visibility = Visibility::evaluate(answers);
    REQUIREMENTS
        .iter()
        .filter(|requirement| requirement.is_visible(answers, &visibility))
        .collect()
}

/// Requirements of one section, whether or not they are currently visible.
pub fn section_requirements(section: Section) -> impl Iterator<Item = &'static Requirement> {
    REQUIREMENTS
        .iter()
        .filter(move |requirement| requirement.section == section)
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn chosen<T: LabelledOption>(value: &Option<T>) -> bool {
    value.as_ref().is_some_and(LabelledOption::is_recognized)
}

fn contact_name(a: &AnswerSet) -> bool {
    filled(&a.contact_name)
}

fn contact_email(a: &AnswerSet) -> bool {
    filled(&a.contact_email)
}

fn business_name(a: &AnswerSet) -> bool {
    filled(&a.business_name)
}

fn business_domain(a: &AnswerSet) -> bool {
    filled(&a.business_domain)
}

fn sellers_json_url(a: &AnswerSet) -> bool {
    filled(&a.sellers_json_url)
}

fn environments(a: &AnswerSet) -> bool {
    a.environments.any_recognized()
}

fn formats(a: &AnswerSet) -> bool {
    a.formats.any_recognized()
}

fn operation_type(a: &AnswerSet) -> bool {
    chosen(&a.operation_type)
}

fn resold_proportion(a: &AnswerSet) -> bool {
    chosen(&a.resold_inventory_proportion)
}

fn seller_categories(a: &AnswerSet) -> bool {
    a.seller_categories.owned_and_operated.any_recognized()
        || a.seller_categories.intermediary.any_recognized()
}

fn child_directed_portion(a: &AnswerSet) -> bool {
    chosen(&a.child_directed_portion)
}

fn app_stores(a: &AnswerSet) -> bool {
    a.app_stores.any_recognized()
}

fn intermediary_proportion(a: &AnswerSet) -> bool {
    chosen(&a.intermediary_info.inventory_proportion)
}

fn web_integration_methods(a: &AnswerSet) -> bool {
    a.web_technical.integration_methods.any_recognized()
}

fn web_preferred_integration(a: &AnswerSet) -> bool {
    let web = &a.web_technical;
    match &web.preferred_integration {
        Some(preferred) => preferred.is_recognized() && web.integration_methods.contains(preferred),
        None => false,
    }
}

fn web_request_volume(a: &AnswerSet) -> bool {
    let volume = &a.web_technical.request_volume;
    filled(&volume.display) || filled(&volume.video)
}

fn web_traffic(a: &AnswerSet) -> bool {
    let traffic = &a.web_technical.traffic_percentage;
    traffic.display.any_populated() || traffic.video.any_populated()
}

fn web_data_centers(a: &AnswerSet) -> bool {
    a.web_technical.data_centers.any_recognized()
}

fn web_pricing_vendor(a: &AnswerSet) -> bool {
    filled(&a.web_technical.pricing_strategy.vendor)
}

fn web_pricing_integration(a: &AnswerSet) -> bool {
    filled(&a.web_technical.pricing_strategy.integration_using)
}

fn web_ad_server_platforms(a: &AnswerSet) -> bool {
    filled(&a.web_technical.ad_server_platforms)
}

fn web_header_bidding_type(a: &AnswerSet) -> bool {
    filled(&a.web_technical.header_bidding_type)
}

fn web_timeout(a: &AnswerSet) -> bool {
    filled(&a.web_technical.timeout_setting)
}

fn ortb_impression_tracking(a: &AnswerSet) -> bool {
    a.ortb_technical.impression_tracking.any_recognized()
}

fn ortb_scanning_partner(a: &AnswerSet) -> bool {
    filled(&a.ortb_technical.ad_quality.scanning_partner)
}

fn ortb_scanning_rate(a: &AnswerSet) -> bool {
    filled(&a.ortb_technical.ad_quality.scanning_rate)
}

fn ortb_table_url(a: &AnswerSet) -> bool {
    filled(&a.ortb_technical.cookie_matching.table_url)
}

fn ortb_macros(a: &AnswerSet) -> bool {
    filled(&a.ortb_technical.cookie_matching.macros)
}

fn ortb_eids(a: &AnswerSet) -> bool {
    !a.ortb_technical.cookie_matching.eids_types.is_empty()
}

fn ctv_integration_methods(a: &AnswerSet) -> bool {
    a.ctv_app_technical.integration_methods.any_recognized()
}

fn ctv_preferred_integration(a: &AnswerSet) -> bool {
    let ctv = &a.ctv_app_technical;
    match &ctv.preferred_integration {
        Some(preferred) => preferred.is_recognized() && ctv.integration_methods.contains(preferred),
        None => false,
    }
}

fn ctv_request_volume(a: &AnswerSet) -> bool {
    let volume = &a.ctv_app_technical.request_volume;
    filled(&volume.ctv) || filled(&volume.in_app)
}

fn ctv_traffic(a: &AnswerSet) -> bool {
    let traffic = &a.ctv_app_technical.traffic_percentage;
    traffic.in_app.any_populated() || traffic.ctv.any_populated()
}

fn ctv_data_centers(a: &AnswerSet) -> bool {
    a.ctv_app_technical.data_centers.any_recognized()
}

fn ctv_impression_tracking(a: &AnswerSet) -> bool {
    a.ctv_app_technical
        .technical_settings
        .impression_tracking
        .any_recognized()
}

fn ctv_mapping_granularity(a: &AnswerSet) -> bool {
    filled(
        &a.ctv_app_technical
            .technical_settings
            .inventory_management
            .mapping_granularity,
    )
}

fn ctv_revenue_caps_details(a: &AnswerSet) -> bool {
    filled(
        &a.ctv_app_technical
            .technical_settings
            .inventory_management
            .revenue_caps_details,
    )
}

macro_rules! requirement {
    ($key:literal, $label:literal, $section:ident, $gate:ident, $required:literal, $check:ident) => {
        Requirement {
            key: $key,
            label: $label,
            section: Section::$section,
            gate: Gate::$gate,
            required: $required,
            check: $check,
        }
    };
}

/// Every tracked answer, grouped by section in presentation order.
pub static REQUIREMENTS: &[Requirement] = &[
    requirement!("contact-name", "Contact name", Generic, Always, false, contact_name),
    requirement!("contact-email", "Contact email", Generic, Always, false, contact_email),
    requirement!("business-name", "Business name", Generic, Always, true, business_name),
    requirement!("business-domain", "Business domain", Generic, Always, true, business_domain),
    requirement!("sellers-json-url", "Sellers.json URL", Generic, SellersJsonHosted, true, sellers_json_url),
    requirement!("environments", "Environments", Generic, Always, true, environments),
    requirement!("formats", "Ad formats", Generic, Always, true, formats),
    requirement!("operation-type", "Operation type", Generic, Always, true, operation_type),
    requirement!("resold-proportion", "Resold inventory proportion", Generic, OperationIncludesResale, false, resold_proportion),
    requirement!("seller-categories", "Seller categories", Generic, Always, true, seller_categories),
    requirement!("intermediary-proportion", "Intermediary inventory proportion", Generic, IntermediarySelected, false, intermediary_proportion),
    requirement!("child-directed-portion", "Child-directed portion", Generic, Always, false, child_directed_portion),
    requirement!("app-stores", "App stores", Generic, AppRelated, true, app_stores),
    requirement!("web-integration-methods", "Web integration methods", WebTechnical, Always, true, web_integration_methods),
    requirement!("web-preferred-integration", "Preferred web integration", WebTechnical, Always, true, web_preferred_integration),
    requirement!("web-request-volume", "Display or video request volume", WebTechnical, Always, true, web_request_volume),
    requirement!("web-traffic", "Regional traffic split (display or video)", WebTechnical, Always, true, web_traffic),
    requirement!("web-data-centers", "Web data centers", WebTechnical, Always, true, web_data_centers),
    requirement!("web-pricing-vendor", "Pricing vendor", WebTechnical, PricingStrategyImplemented, false, web_pricing_vendor),
    requirement!("web-pricing-integration", "Pricing integration", WebTechnical, PricingStrategyImplemented, false, web_pricing_integration),
    requirement!("web-ad-server-platforms", "Ad server platforms", WebTechnical, Always, false, web_ad_server_platforms),
    requirement!("web-header-bidding-type", "Header bidding type", WebTechnical, Always, false, web_header_bidding_type),
    requirement!("web-timeout", "Timeout setting", WebTechnical, Always, false, web_timeout),
    requirement!("ortb-impression-tracking", "oRTB impression tracking", WebTechnical, Always, false, ortb_impression_tracking),
    requirement!("ortb-scanning-partner", "Scanning partner", WebTechnical, ScanningConducted, false, ortb_scanning_partner),
    requirement!("ortb-scanning-rate", "Scanning rate", WebTechnical, ScanningConducted, false, ortb_scanning_rate),
    requirement!("ortb-table-url", "Match table URL", WebTechnical, CookieTableHosted, false, ortb_table_url),
    requirement!("ortb-macros", "Cookie sync macros", WebTechnical, DataPointsRequired, false, ortb_macros),
    requirement!("ortb-eids", "Supported EIDs", WebTechnical, EidsSupported, false, ortb_eids),
    requirement!("ctv-integration-methods", "CTV/App integration methods", CtvAppTechnical, Always, true, ctv_integration_methods),
    requirement!("ctv-preferred-integration", "Preferred CTV/App integration", CtvAppTechnical, Always, true, ctv_preferred_integration),
    requirement!("ctv-request-volume", "CTV or in-app request volume", CtvAppTechnical, Always, true, ctv_request_volume),
    requirement!("ctv-traffic", "Regional traffic split (in-app or CTV)", CtvAppTechnical, Always, true, ctv_traffic),
    requirement!("ctv-data-centers", "CTV/App data centers", CtvAppTechnical, Always, true, ctv_data_centers),
    requirement!("ctv-impression-tracking", "CTV/App impression tracking", CtvAppTechnical, Always, false, ctv_impression_tracking),
    requirement!("ctv-mapping-granularity", "Mapping granularity", CtvAppTechnical, MappingRequired, false, ctv_mapping_granularity),
    requirement!("ctv-revenue-caps-details", "Revenue caps details", CtvAppTechnical, RevenueCapsInPlace, false, ctv_revenue_caps_details),
];

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::{Environment, FlagField};

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = REQUIREMENTS.iter().map(|r| r.key).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
    }

    #[test]
    fn gated_rows_appear_only_when_their_gate_opens() {
        let mut answers = AnswerSet::empty();
        let listed = |answers: &AnswerSet, key: &str| {
            visible_fields(answers).iter().any(|r| r.key == key)
        };

        assert!(!listed(&answers, "sellers-json-url"));
        *FlagField::HasSellersJson.slot_mut(&mut answers) = true;
        assert!(listed(&answers, "sellers-json-url"));

        assert!(!listed(&answers, "resold-proportion"));
        answers.operation_type = Some(OperationType::Both);
        assert!(listed(&answers, "resold-proportion"));

        assert!(!listed(&answers, "web-data-centers"));
        answers.environments.insert(Environment::Web);
        assert!(listed(&answers, "web-data-centers"));
        assert!(!listed(&answers, "ctv-data-centers"));
    }

    #[test]
    fn blank_text_does_not_count_as_filled() {
        let mut answers = AnswerSet::empty();
        answers.business_name = "   ".into();
        let row = REQUIREMENTS
            .iter()
            .find(|r| r.key == "business-name")
            .unwrap();
        assert!(!row.is_satisfied(&answers));
        answers.business_name = " Acme ".into();
        assert!(row.is_satisfied(&answers));
    }
}

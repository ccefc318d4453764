//! The Answer Set: every value collected by one onboarding questionnaire.
//!
//! Field names serialize in camelCase so stored records keep the same shape as
//! forms captured by earlier front ends.

use serde::{Deserialize, Serialize};

use crate::options::*;
use crate::selection::OptionSet;

/// Complete nested record of answers for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSet {
    #[serde(rename = "name")]
    pub contact_name: String,
    #[serde(rename = "email")]
    pub contact_email: String,
    pub business_name: String,
    pub business_domain: String,
    pub has_sellers_json: bool,
    pub sellers_json_url: String,

    pub environments: OptionSet<Environment>,
    pub formats: OptionSet<AdFormat>,
    #[serde(deserialize_with = "blank_as_none")]
    pub operation_type: Option<OperationType>,
    #[serde(deserialize_with = "blank_as_none")]
    pub resold_inventory_proportion: Option<ProportionBucket>,
    pub seller_categories: SellerCategories,
    #[serde(deserialize_with = "blank_as_none")]
    pub child_directed_portion: Option<ChildDirectedPortion>,
    pub app_stores: OptionSet<AppStore>,
    pub other_app_stores: String,

    pub intermediary_info: IntermediaryInfo,
    pub app_ctv_info: AppCtvInfo,
    pub supplemental_content_link: String,
    pub additional_info: String,

    pub web_technical: WebTechnical,
    pub ortb_technical: OrtbTechnical,
    pub ctv_app_technical: CtvAppTechnical,
}

impl AnswerSet {
    /// The empty Answer Set a fresh session starts from.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Seller categories split into two non-overlapping groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerCategories {
    pub owned_and_operated: OptionSet<OwnedOperatedCategory>,
    pub intermediary: OptionSet<IntermediaryCategory>,
}

impl SellerCategories {
    pub fn is_empty(&self) -> bool {
        self.owned_and_operated.is_empty() && self.intermediary.is_empty()
    }
}

/// Disclosures relevant once at least one intermediary category is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntermediaryInfo {
    pub handles_payments: bool,
    pub supports_supply_chain: bool,
    #[serde(deserialize_with = "blank_as_none")]
    pub inventory_proportion: Option<ProportionBucket>,
    pub can_segment_inventory: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppCtvInfo {
    pub displays_third_party_content: bool,
    pub has_content_consent: bool,
}

keyed_enum! {
    /// Reporting regions used by the traffic-percentage breakdowns.
    pub enum Region: "region" {
        NorthAmerica => "north-america",
        Emea => "emea",
        Apac => "apac",
        Latam => "latam",
    }
}

impl Region {
    pub fn title(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Emea => "EMEA",
            Region::Apac => "APAC",
            Region::Latam => "LATAM",
        }
    }
}

/// Free-text traffic share per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionalTraffic {
    pub north_america: String,
    pub emea: String,
    pub apac: String,
    pub latam: String,
}

impl RegionalTraffic {
    pub fn get(&self, region: Region) -> &str {
        match region {
            Region::NorthAmerica => &self.north_america,
            Region::Emea => &self.emea,
            Region::Apac => &self.apac,
            Region::Latam => &self.latam,
        }
    }

    pub fn slot_mut(&mut self, region: Region) -> &mut String {
        match region {
            Region::NorthAmerica => &mut self.north_america,
            Region::Emea => &mut self.emea,
            Region::Apac => &mut self.apac,
            Region::Latam => &mut self.latam,
        }
    }

    /// Returns `true` when at least one region carries a non-blank value.
    pub fn any_populated(&self) -> bool {
        Region::ALL
            .iter()
            .any(|region| !self.get(*region).trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebTechnical {
    pub integration_methods: OptionSet<WebIntegrationMethod>,
    #[serde(deserialize_with = "blank_as_none")]
    pub preferred_integration: Option<WebIntegrationMethod>,
    pub video_player: String,
    pub pricing_strategy: PricingStrategy,
    pub request_volume: WebRequestVolume,
    pub traffic_percentage: WebTraffic,
    pub data_centers: OptionSet<DataCenter>,
    pub pmp_data: String,
    pub sensitive_categories: OptionSet<SensitiveCategory>,
    pub ad_server_platforms: String,
    pub header_bidding_type: String,
    pub timeout_setting: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingStrategy {
    pub implementing: bool,
    pub vendor: String,
    pub integration_using: String,
    #[serde(rename = "sovrnOptimization")]
    pub partner_optimization: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebRequestVolume {
    pub display: String,
    pub video: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebTraffic {
    pub display: RegionalTraffic,
    pub video: RegionalTraffic,
}

/// oRTB protocol compliance answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrtbTechnical {
    pub impression_tracking: OptionSet<ImpressionTracking>,
    pub video_impression_tracking: String,
    pub ad_call_flow: AdCallFlow,
    pub ad_quality: ScanningPolicy,
    pub utc_reporting: bool,
    pub ortb_requirements: OrtbRequirements,
    pub cookie_matching: CookieMatching,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdCallFlow {
    pub impression_event: String,
    pub impression_side: String,
    pub impression_timing: String,
    pub bid_caching: String,
    pub tmax_control: String,
}

/// Creative scanning disclosures; the detail fields matter only when scanning is conducted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanningPolicy {
    #[serde(rename = "conductScanning")]
    pub conducts_scanning: bool,
    pub scanning_partner: String,
    pub scanning_rate: String,
    pub payload_limitations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrtbRequirements {
    pub version: String,
    pub platform: String,
    pub documentation: String,
    pub extra_fields: String,
    pub supports_account_id: bool,
    pub supports_gzip: bool,
    pub supports_tag_id: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieMatching {
    pub can_host_table: bool,
    pub table_url: String,
    pub can_initiate_sync: bool,
    pub requires_data_points: bool,
    pub macros: String,
    pub supports_consent: bool,
    pub match_rate: String,
    pub supports_eids: bool,
    pub eids_types: Vec<String>,
}

impl CookieMatching {
    /// Replaces the EIDs list from newline-delimited text, dropping blank lines.
    pub fn set_eids_from_text(&mut self, text: &str) {
        let mut eids: Vec<String> = Vec::new();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if !eids.iter().any(|existing| existing == line) {
                eids.push(line.to_string());
            }
        }
        self.eids_types = eids;
    }

    /// Renders the EIDs list back to the newline-delimited form it was entered in.
    pub fn eids_text(&self) -> String {
        self.eids_types.join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtvAppTechnical {
    pub integration_methods: OptionSet<CtvIntegrationMethod>,
    #[serde(deserialize_with = "blank_as_none")]
    pub preferred_integration: Option<CtvIntegrationMethod>,
    pub request_volume: CtvRequestVolume,
    pub traffic_percentage: CtvTraffic,
    pub data_centers: OptionSet<DataCenter>,
    pub pmp_data: String,
    pub sensitive_categories: OptionSet<SensitiveCategory>,
    pub technical_settings: TechnicalSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtvRequestVolume {
    pub ctv: String,
    pub in_app: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtvTraffic {
    pub in_app: RegionalTraffic,
    pub ctv: RegionalTraffic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSettings {
    pub impression_tracking: OptionSet<ImpressionTracking>,
    pub mobile_app_tracking: MobileAppTracking,
    pub networking: Networking,
    pub ad_quality: QualityVendors,
    pub ortb_requirements: CtvOrtbRequirements,
    pub inventory_management: InventoryManagement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MobileAppTracking {
    #[serde(deserialize_with = "blank_as_none")]
    pub burl_timing: Option<BurlTiming>,
    pub interstitial_tracking: String,
    pub additional_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Networking {
    pub three_pid_support: String,
    pub sk_ad_network_support: bool,
    pub ad_pods_support: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityVendors {
    pub quality_vendors: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtvOrtbRequirements {
    pub multi_impression_support: bool,
    pub multi_format_support: bool,
    pub multi_bid_support: bool,
    pub demographic_data_support: bool,
    pub content_object_support: bool,
    pub impression_expiry_window: String,
    pub max_timeout: bool,
}

/// Two independent boolean-gated detail blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryManagement {
    pub requires_mapping: bool,
    pub mapping_granularity: String,
    pub has_revenue_caps: bool,
    pub revenue_caps_details: String,
}

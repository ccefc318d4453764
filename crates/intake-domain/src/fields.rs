//! Addresses for individual answers, used by drivers and the form state store.
//!
//! Every address resolves to exactly one slot in the [`AnswerSet`]; the matches
//! below are exhaustive so a new field is a compile-time-visible change.

use crate::answers::{AnswerSet, RegionalTraffic};
use crate::error::DomainError;
use crate::options::*;

keyed_enum! {
    /// Free-text answers.
    pub enum TextField: "text field" {
        ContactName => "contact-name",
        ContactEmail => "contact-email",
        BusinessName => "business-name",
        BusinessDomain => "business-domain",
        SellersJsonUrl => "sellers-json-url",
        OtherAppStores => "other-app-stores",
        SupplementalContentLink => "supplemental-content-link",
        AdditionalInfo => "additional-info",
        WebVideoPlayer => "web-video-player",
        WebPricingVendor => "web-pricing-vendor",
        WebPricingIntegration => "web-pricing-integration",
        WebDisplayVolume => "web-display-volume",
        WebVideoVolume => "web-video-volume",
        WebPmpData => "web-pmp-data",
        WebAdServerPlatforms => "web-ad-server-platforms",
        WebHeaderBiddingType => "web-header-bidding-type",
        WebTimeoutSetting => "web-timeout",
        OrtbVideoImpressionTracking => "ortb-video-impression-tracking",
        OrtbImpressionEvent => "ortb-impression-event",
        OrtbImpressionSide => "ortb-impression-side",
        OrtbImpressionTiming => "ortb-impression-timing",
        OrtbBidCaching => "ortb-bid-caching",
        OrtbTmaxControl => "ortb-tmax-control",
        OrtbScanningPartner => "ortb-scanning-partner",
        OrtbScanningRate => "ortb-scanning-rate",
        OrtbPayloadLimitations => "ortb-payload-limitations",
        OrtbVersion => "ortb-version",
        OrtbPlatform => "ortb-platform",
        OrtbDocumentation => "ortb-documentation",
        OrtbExtraFields => "ortb-extra-fields",
        OrtbTableUrl => "ortb-table-url",
        OrtbMacros => "ortb-macros",
        OrtbMatchRate => "ortb-match-rate",
        CtvVolume => "ctv-volume",
        CtvInAppVolume => "ctv-in-app-volume",
        CtvPmpData => "ctv-pmp-data",
        CtvInterstitialTracking => "ctv-interstitial-tracking",
        CtvTrackingInfo => "ctv-tracking-info",
        CtvThreePid => "ctv-3pid",
        CtvQualityVendors => "ctv-quality-vendors",
        CtvExpiryWindow => "ctv-expiry-window",
        CtvMappingGranularity => "ctv-mapping-granularity",
        CtvRevenueCapsDetails => "ctv-revenue-caps-details",
    }
}

impl TextField {
    pub fn get(self, answers: &AnswerSet) -> &str {
        text_ref(self, answers)
    }

    pub fn slot_mut(self, answers: &mut AnswerSet) -> &mut String {
        let web = &mut answers.web_technical;
        let ortb = &mut answers.ortb_technical;
        let ctv = &mut answers.ctv_app_technical;
        match self {
            TextField::ContactName => &mut answers.contact_name,
            TextField::ContactEmail => &mut answers.contact_email,
            TextField::BusinessName => &mut answers.business_name,
            TextField::BusinessDomain => &mut answers.business_domain,
            TextField::SellersJsonUrl => &mut answers.sellers_json_url,
            TextField::OtherAppStores => &mut answers.other_app_stores,
            TextField::SupplementalContentLink => &mut answers.supplemental_content_link,
            TextField::AdditionalInfo => &mut answers.additional_info,
            TextField::WebVideoPlayer => &mut web.video_player,
            TextField::WebPricingVendor => &mut web.pricing_strategy.vendor,
            TextField::WebPricingIntegration => &mut web.pricing_strategy.integration_using,
            TextField::WebDisplayVolume => &mut web.request_volume.display,
            TextField::WebVideoVolume => &mut web.request_volume.video,
            TextField::WebPmpData => &mut web.pmp_data,
            TextField::WebAdServerPlatforms => &mut web.ad_server_platforms,
            TextField::WebHeaderBiddingType => &mut web.header_bidding_type,
            TextField::WebTimeoutSetting => &mut web.timeout_setting,
            TextField::OrtbVideoImpressionTracking => &mut ortb.video_impression_tracking,
            TextField::OrtbImpressionEvent => &mut ortb.ad_call_flow.impression_event,
            TextField::OrtbImpressionSide => &mut ortb.ad_call_flow.impression_side,
            TextField::OrtbImpressionTiming => &mut ortb.ad_call_flow.impression_timing,
            TextField::OrtbBidCaching => &mut ortb.ad_call_flow.bid_caching,
            TextField::OrtbTmaxControl => &mut ortb.ad_call_flow.tmax_control,
            TextField::OrtbScanningPartner => &mut ortb.ad_quality.scanning_partner,
            TextField::OrtbScanningRate => &mut ortb.ad_quality.scanning_rate,
            TextField::OrtbPayloadLimitations => &mut ortb.ad_quality.payload_limitations,
            TextField::OrtbVersion => &mut ortb.ortb_requirements.version,
            TextField::OrtbPlatform => &mut ortb.ortb_requirements.platform,
            TextField::OrtbDocumentation => &mut ortb.ortb_requirements.documentation,
            TextField::OrtbExtraFields => &mut ortb.ortb_requirements.extra_fields,
            TextField::OrtbTableUrl => &mut ortb.cookie_matching.table_url,
            TextField::OrtbMacros => &mut ortb.cookie_matching.macros,
            TextField::OrtbMatchRate => &mut ortb.cookie_matching.match_rate,
            TextField::CtvVolume => &mut ctv.request_volume.ctv,
            TextField::CtvInAppVolume => &mut ctv.request_volume.in_app,
            TextField::CtvPmpData => &mut ctv.pmp_data,
            TextField::CtvInterstitialTracking => {
                &mut ctv.technical_settings.mobile_app_tracking.interstitial_tracking
            }
            TextField::CtvTrackingInfo => {
                &mut ctv.technical_settings.mobile_app_tracking.additional_info
            }
            TextField::CtvThreePid => &mut ctv.technical_settings.networking.three_pid_support,
            TextField::CtvQualityVendors => &mut ctv.technical_settings.ad_quality.quality_vendors,
            TextField::CtvExpiryWindow => {
                &mut ctv.technical_settings.ortb_requirements.impression_expiry_window
            }
            TextField::CtvMappingGranularity => {
                &mut ctv.technical_settings.inventory_management.mapping_granularity
            }
            TextField::CtvRevenueCapsDetails => {
                &mut ctv.technical_settings.inventory_management.revenue_caps_details
            }
        }
    }
}

fn text_ref(field: TextField, answers: &AnswerSet) -> &str {
    let web = &answers.web_technical;
    let ortb = &answers.ortb_technical;
    let ctv = &answers.ctv_app_technical;
    let settings = &ctv.technical_settings;
    match field {
        TextField::ContactName => &answers.contact_name,
        TextField::ContactEmail => &answers.contact_email,
        TextField::BusinessName => &answers.business_name,
        TextField::BusinessDomain => &answers.business_domain,
        TextField::SellersJsonUrl => &answers.sellers_json_url,
        TextField::OtherAppStores => &answers.other_app_stores,
        TextField::SupplementalContentLink => &answers.supplemental_content_link,
        TextField::AdditionalInfo => &answers.additional_info,
        TextField::WebVideoPlayer => &web.video_player,
        TextField::WebPricingVendor => &web.pricing_strategy.vendor,
        TextField::WebPricingIntegration => &web.pricing_strategy.integration_using,
        TextField::WebDisplayVolume => &web.request_volume.display,
        TextField::WebVideoVolume => &web.request_volume.video,
        TextField::WebPmpData => &web.pmp_data,
        TextField::WebAdServerPlatforms => &web.ad_server_platforms,
        TextField::WebHeaderBiddingType => &web.header_bidding_type,
        TextField::WebTimeoutSetting => &web.timeout_setting,
        TextField::OrtbVideoImpressionTracking => &ortb.video_impression_tracking,
        TextField::OrtbImpressionEvent => &ortb.ad_call_flow.impression_event,
        TextField::OrtbImpressionSide => &ortb.ad_call_flow.impression_side,
        TextField::OrtbImpressionTiming => &ortb.ad_call_flow.impression_timing,
        TextField::OrtbBidCaching => &ortb.ad_call_flow.bid_caching,
        TextField::OrtbTmaxControl => &ortb.ad_call_flow.tmax_control,
        TextField::OrtbScanningPartner => &ortb.ad_quality.scanning_partner,
        TextField::OrtbScanningRate => &ortb.ad_quality.scanning_rate,
        TextField::OrtbPayloadLimitations => &ortb.ad_quality.payload_limitations,
        TextField::OrtbVersion => &ortb.ortb_requirements.version,
        TextField::OrtbPlatform => &ortb.ortb_requirements.platform,
        TextField::OrtbDocumentation => &ortb.ortb_requirements.documentation,
        TextField::OrtbExtraFields => &ortb.ortb_requirements.extra_fields,
        TextField::OrtbTableUrl => &ortb.cookie_matching.table_url,
        TextField::OrtbMacros => &ortb.cookie_matching.macros,
        TextField::OrtbMatchRate => &ortb.cookie_matching.match_rate,
        TextField::CtvVolume => &ctv.request_volume.ctv,
        TextField::CtvInAppVolume => &ctv.request_volume.in_app,
        TextField::CtvPmpData => &ctv.pmp_data,
        TextField::CtvInterstitialTracking => &settings.mobile_app_tracking.interstitial_tracking,
        TextField::CtvTrackingInfo => &settings.mobile_app_tracking.additional_info,
        TextField::CtvThreePid => &settings.networking.three_pid_support,
        TextField::CtvQualityVendors => &settings.ad_quality.quality_vendors,
        TextField::CtvExpiryWindow => &settings.ortb_requirements.impression_expiry_window,
        TextField::CtvMappingGranularity => &settings.inventory_management.mapping_granularity,
        TextField::CtvRevenueCapsDetails => &settings.inventory_management.revenue_caps_details,
    }
}

keyed_enum! {
    /// Yes/no answers.
    pub enum FlagField: "flag" {
        HasSellersJson => "has-sellers-json",
        HandlesPayments => "intermediary-payments",
        SupportsSupplyChain => "intermediary-supply-chain",
        CanSegmentInventory => "intermediary-segmentation",
        DisplaysThirdPartyContent => "third-party-content",
        HasContentConsent => "content-consent",
        WebPricingImplementing => "web-pricing-implementing",
        WebPartnerOptimization => "web-pricing-optimization",
        OrtbConductsScanning => "ortb-conducts-scanning",
        OrtbUtcReporting => "ortb-utc-reporting",
        OrtbAccountId => "ortb-account-id",
        OrtbGzip => "ortb-gzip",
        OrtbTagId => "ortb-tag-id",
        OrtbHostsTable => "ortb-hosts-table",
        OrtbInitiatesSync => "ortb-initiates-sync",
        OrtbRequiresDataPoints => "ortb-requires-data-points",
        OrtbConsent => "ortb-consent",
        OrtbSupportsEids => "ortb-supports-eids",
        CtvSkAdNetwork => "ctv-skadnetwork",
        CtvAdPods => "ctv-ad-pods",
        CtvMultiImpression => "ctv-multi-impression",
        CtvMultiFormat => "ctv-multi-format",
        CtvMultiBid => "ctv-multi-bid",
        CtvDemographicData => "ctv-demographic-data",
        CtvContentObject => "ctv-content-object",
        CtvMaxTimeout => "ctv-max-timeout",
        CtvRequiresMapping => "ctv-requires-mapping",
        CtvRevenueCaps => "ctv-revenue-caps",
    }
}

impl FlagField {
    pub fn get(self, answers: &AnswerSet) -> bool {
        let ortb = &answers.ortb_technical;
        let settings = &answers.ctv_app_technical.technical_settings;
        match self {
            FlagField::HasSellersJson => answers.has_sellers_json,
            FlagField::HandlesPayments => answers.intermediary_info.handles_payments,
            FlagField::SupportsSupplyChain => answers.intermediary_info.supports_supply_chain,
            FlagField::CanSegmentInventory => answers.intermediary_info.can_segment_inventory,
            FlagField::DisplaysThirdPartyContent => {
                answers.app_ctv_info.displays_third_party_content
            }
            FlagField::HasContentConsent => answers.app_ctv_info.has_content_consent,
            FlagField::WebPricingImplementing => answers.web_technical.pricing_strategy.implementing,
            FlagField::WebPartnerOptimization => {
                answers.web_technical.pricing_strategy.partner_optimization
            }
            FlagField::OrtbConductsScanning => ortb.ad_quality.conducts_scanning,
            FlagField::OrtbUtcReporting => ortb.utc_reporting,
            FlagField::OrtbAccountId => ortb.ortb_requirements.supports_account_id,
            FlagField::OrtbGzip => ortb.ortb_requirements.supports_gzip,
            FlagField::OrtbTagId => ortb.ortb_requirements.supports_tag_id,
            FlagField::OrtbHostsTable => ortb.cookie_matching.can_host_table,
            FlagField::OrtbInitiatesSync => ortb.cookie_matching.can_initiate_sync,
            FlagField::OrtbRequiresDataPoints => ortb.cookie_matching.requires_data_points,
            FlagField::OrtbConsent => ortb.cookie_matching.supports_consent,
            FlagField::OrtbSupportsEids => ortb.cookie_matching.supports_eids,
            FlagField::CtvSkAdNetwork => settings.networking.sk_ad_network_support,
            FlagField::CtvAdPods => settings.networking.ad_pods_support,
            FlagField::CtvMultiImpression => settings.ortb_requirements.multi_impression_support,
            FlagField::CtvMultiFormat => settings.ortb_requirements.multi_format_support,
            FlagField::CtvMultiBid => settings.ortb_requirements.multi_bid_support,
            FlagField::CtvDemographicData => settings.ortb_requirements.demographic_data_support,
            FlagField::CtvContentObject => settings.ortb_requirements.content_object_support,
            FlagField::CtvMaxTimeout => settings.ortb_requirements.max_timeout,
            FlagField::CtvRequiresMapping => settings.inventory_management.requires_mapping,
            FlagField::CtvRevenueCaps => settings.inventory_management.has_revenue_caps,
        }
    }

    pub fn slot_mut(self, answers: &mut AnswerSet) -> &mut bool {
        let ortb = &mut answers.ortb_technical;
        let settings = &mut answers.ctv_app_technical.technical_settings;
        match self {
            FlagField::HasSellersJson => &mut answers.has_sellers_json,
            FlagField::HandlesPayments => &mut answers.intermediary_info.handles_payments,
            FlagField::SupportsSupplyChain => &mut answers.intermediary_info.supports_supply_chain,
            FlagField::CanSegmentInventory => &mut answers.intermediary_info.can_segment_inventory,
            FlagField::DisplaysThirdPartyContent => {
                &mut answers.app_ctv_info.displays_third_party_content
            }
            FlagField::HasContentConsent => &mut answers.app_ctv_info.has_content_consent,
            FlagField::WebPricingImplementing => {
                &mut answers.web_technical.pricing_strategy.implementing
            }
            FlagField::WebPartnerOptimization => {
                &mut answers.web_technical.pricing_strategy.partner_optimization
            }
            FlagField::OrtbConductsScanning => &mut ortb.ad_quality.conducts_scanning,
            FlagField::OrtbUtcReporting => &mut ortb.utc_reporting,
            FlagField::OrtbAccountId => &mut ortb.ortb_requirements.supports_account_id,
            FlagField::OrtbGzip => &mut ortb.ortb_requirements.supports_gzip,
            FlagField::OrtbTagId => &mut ortb.ortb_requirements.supports_tag_id,
            FlagField::OrtbHostsTable => &mut ortb.cookie_matching.can_host_table,
            FlagField::OrtbInitiatesSync => &mut ortb.cookie_matching.can_initiate_sync,
            FlagField::OrtbRequiresDataPoints => &mut ortb.cookie_matching.requires_data_points,
            FlagField::OrtbConsent => &mut ortb.cookie_matching.supports_consent,
            FlagField::OrtbSupportsEids => &mut ortb.cookie_matching.supports_eids,
            FlagField::CtvSkAdNetwork => &mut settings.networking.sk_ad_network_support,
            FlagField::CtvAdPods => &mut settings.networking.ad_pods_support,
            FlagField::CtvMultiImpression => &mut settings.ortb_requirements.multi_impression_support,
            FlagField::CtvMultiFormat => &mut settings.ortb_requirements.multi_format_support,
            FlagField::CtvMultiBid => &mut settings.ortb_requirements.multi_bid_support,
            FlagField::CtvDemographicData => {
                &mut settings.ortb_requirements.demographic_data_support
            }
            FlagField::CtvContentObject => &mut settings.ortb_requirements.content_object_support,
            FlagField::CtvMaxTimeout => &mut settings.ortb_requirements.max_timeout,
            FlagField::CtvRequiresMapping => &mut settings.inventory_management.requires_mapping,
            FlagField::CtvRevenueCaps => &mut settings.inventory_management.has_revenue_caps,
        }
    }
}

/// Parses yes/no driver input.
pub fn parse_flag(value: &str) -> Result<bool, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" | "1" => Ok(true),
        "no" | "n" | "false" | "off" | "0" => Ok(false),
        other => Err(DomainError::UnknownOption {
            kind: "yes/no answer",
            value: other.to_string(),
        }),
    }
}

keyed_enum! {
    /// Multi-select answers.
    pub enum SetField: "multi-select field" {
        Environments => "environments",
        Formats => "formats",
        OwnedOperatedCategories => "owned-operated-categories",
        IntermediaryCategories => "intermediary-categories",
        AppStores => "app-stores",
        WebIntegrationMethods => "web-integration-methods",
        WebDataCenters => "web-data-centers",
        WebSensitiveCategories => "web-sensitive-categories",
        OrtbImpressionTracking => "ortb-impression-tracking",
        CtvIntegrationMethods => "ctv-integration-methods",
        CtvDataCenters => "ctv-data-centers",
        CtvSensitiveCategories => "ctv-sensitive-categories",
        CtvImpressionTracking => "ctv-impression-tracking",
    }
}

impl SetField {
    /// Keys of the options this field accepts.
    pub fn option_keys(self) -> &'static [&'static str] {
        match self {
            SetField::Environments => Environment::KEYS,
            SetField::Formats => AdFormat::KEYS,
            SetField::OwnedOperatedCategories => OwnedOperatedCategory::KEYS,
            SetField::IntermediaryCategories => IntermediaryCategory::KEYS,
            SetField::AppStores => AppStore::KEYS,
            SetField::WebIntegrationMethods => WebIntegrationMethod::KEYS,
            SetField::WebDataCenters | SetField::CtvDataCenters => DataCenter::KEYS,
            SetField::WebSensitiveCategories | SetField::CtvSensitiveCategories => {
                SensitiveCategory::KEYS
            }
            SetField::OrtbImpressionTracking | SetField::CtvImpressionTracking => {
                ImpressionTracking::KEYS
            }
            SetField::CtvIntegrationMethods => CtvIntegrationMethod::KEYS,
        }
    }
}

/// A typed member of one multi-select answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Environment(Environment),
    Format(AdFormat),
    OwnedOperated(OwnedOperatedCategory),
    Intermediary(IntermediaryCategory),
    AppStore(AppStore),
    WebIntegration(WebIntegrationMethod),
    WebDataCenter(DataCenter),
    WebSensitive(SensitiveCategory),
    OrtbImpressionTracking(ImpressionTracking),
    CtvIntegration(CtvIntegrationMethod),
    CtvDataCenter(DataCenter),
    CtvSensitive(SensitiveCategory),
    CtvImpressionTracking(ImpressionTracking),
}

impl Member {
    /// Parses `value` as an option of `field`, rejecting unknown options.
    pub fn parse(field: SetField, value: &str) -> Result<Self, DomainError> {
        Ok(match field {
            SetField::Environments => Member::Environment(Environment::parse(value)?),
            SetField::Formats => Member::Format(AdFormat::parse(value)?),
            SetField::OwnedOperatedCategories => {
                Member::OwnedOperated(OwnedOperatedCategory::parse(value)?)
            }
            SetField::IntermediaryCategories => {
                Member::Intermediary(IntermediaryCategory::parse(value)?)
            }
            SetField::AppStores => Member::AppStore(AppStore::parse(value)?),
            SetField::WebIntegrationMethods => {
                Member::WebIntegration(WebIntegrationMethod::parse(value)?)
            }
            SetField::WebDataCenters => Member::WebDataCenter(DataCenter::parse(value)?),
            SetField::WebSensitiveCategories => {
                Member::WebSensitive(SensitiveCategory::parse(value)?)
            }
            SetField::OrtbImpressionTracking => {
                Member::OrtbImpressionTracking(ImpressionTracking::parse(value)?)
            }
            SetField::CtvIntegrationMethods => {
                Member::CtvIntegration(CtvIntegrationMethod::parse(value)?)
            }
            SetField::CtvDataCenters => Member::CtvDataCenter(DataCenter::parse(value)?),
            SetField::CtvSensitiveCategories => {
                Member::CtvSensitive(SensitiveCategory::parse(value)?)
            }
            SetField::CtvImpressionTracking => {
                Member::CtvImpressionTracking(ImpressionTracking::parse(value)?)
            }
        })
    }

    pub fn field(&self) -> SetField {
        match self {
            Member::Environment(_) => SetField::Environments,
            Member::Format(_) => SetField::Formats,
            Member::OwnedOperated(_) => SetField::OwnedOperatedCategories,
            Member::Intermediary(_) => SetField::IntermediaryCategories,
            Member::AppStore(_) => SetField::AppStores,
            Member::WebIntegration(_) => SetField::WebIntegrationMethods,
            Member::WebDataCenter(_) => SetField::WebDataCenters,
            Member::WebSensitive(_) => SetField::WebSensitiveCategories,
            Member::OrtbImpressionTracking(_) => SetField::OrtbImpressionTracking,
            Member::CtvIntegration(_) => SetField::CtvIntegrationMethods,
            Member::CtvDataCenter(_) => SetField::CtvDataCenters,
            Member::CtvSensitive(_) => SetField::CtvSensitiveCategories,
            Member::CtvImpressionTracking(_) => SetField::CtvImpressionTracking,
        }
    }

    pub fn is_selected_in(&self, answers: &AnswerSet) -> bool {
        let web = &answers.web_technical;
        let ctv = &answers.ctv_app_technical;
        match self {
            Member::Environment(value) => answers.environments.contains(value),
            Member::Format(value) => answers.formats.contains(value),
            Member::OwnedOperated(value) => {
                answers.seller_categories.owned_and_operated.contains(value)
            }
            Member::Intermediary(value) => answers.seller_categories.intermediary.contains(value),
            Member::AppStore(value) => answers.app_stores.contains(value),
            Member::WebIntegration(value) => web.integration_methods.contains(value),
            Member::WebDataCenter(value) => web.data_centers.contains(value),
            Member::WebSensitive(value) => web.sensitive_categories.contains(value),
            Member::OrtbImpressionTracking(value) => {
                answers.ortb_technical.impression_tracking.contains(value)
            }
            Member::CtvIntegration(value) => ctv.integration_methods.contains(value),
            Member::CtvDataCenter(value) => ctv.data_centers.contains(value),
            Member::CtvSensitive(value) => ctv.sensitive_categories.contains(value),
            Member::CtvImpressionTracking(value) => {
                ctv.technical_settings.impression_tracking.contains(value)
            }
        }
    }

    /// Flips membership in the addressed set, returning whether it is selected afterwards.
    pub fn toggle_in(self, answers: &mut AnswerSet) -> bool {
        let web = &mut answers.web_technical;
        let ctv = &mut answers.ctv_app_technical;
        match self {
            Member::Environment(value) => answers.environments.toggle(value),
            Member::Format(value) => answers.formats.toggle(value),
            Member::OwnedOperated(value) => {
                answers.seller_categories.owned_and_operated.toggle(value)
            }
            Member::Intermediary(value) => answers.seller_categories.intermediary.toggle(value),
            Member::AppStore(value) => answers.app_stores.toggle(value),
            Member::WebIntegration(value) => web.integration_methods.toggle(value),
            Member::WebDataCenter(value) => web.data_centers.toggle(value),
            Member::WebSensitive(value) => web.sensitive_categories.toggle(value),
            Member::OrtbImpressionTracking(value) => {
                answers.ortb_technical.impression_tracking.toggle(value)
            }
            Member::CtvIntegration(value) => ctv.integration_methods.toggle(value),
            Member::CtvDataCenter(value) => ctv.data_centers.toggle(value),
            Member::CtvSensitive(value) => ctv.sensitive_categories.toggle(value),
            Member::CtvImpressionTracking(value) => {
                ctv.technical_settings.impression_tracking.toggle(value)
            }
        }
    }
}

keyed_enum! {
    /// Single-choice answers.
    pub enum ChoiceField: "single-choice field" {
        OperationType => "operation-type",
        ResoldProportion => "resold-proportion",
        ChildDirectedPortion => "child-directed-portion",
        IntermediaryProportion => "intermediary-proportion",
        WebPreferredIntegration => "web-preferred-integration",
        CtvPreferredIntegration => "ctv-preferred-integration",
        BurlTiming => "ctv-burl-timing",
    }
}

impl ChoiceField {
    pub fn option_keys(self) -> &'static [&'static str] {
        match self {
            ChoiceField::OperationType => OperationType::KEYS,
            ChoiceField::ResoldProportion | ChoiceField::IntermediaryProportion => {
                ProportionBucket::KEYS
            }
            ChoiceField::ChildDirectedPortion => ChildDirectedPortion::KEYS,
            ChoiceField::WebPreferredIntegration => WebIntegrationMethod::KEYS,
            ChoiceField::CtvPreferredIntegration => CtvIntegrationMethod::KEYS,
            ChoiceField::BurlTiming => BurlTiming::KEYS,
        }
    }
}

/// A typed single-choice answer; `None` clears the choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    OperationType(Option<OperationType>),
    ResoldProportion(Option<ProportionBucket>),
    ChildDirectedPortion(Option<ChildDirectedPortion>),
    IntermediaryProportion(Option<ProportionBucket>),
    WebPreferredIntegration(Option<WebIntegrationMethod>),
    CtvPreferredIntegration(Option<CtvIntegrationMethod>),
    BurlTiming(Option<BurlTiming>),
}

impl Choice {
    /// Parses driver input; `clear` (or `none` where that is not an option) unsets the answer.
    pub fn parse(field: ChoiceField, value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let clear = trimmed.eq_ignore_ascii_case("clear") || trimmed.is_empty();
        Ok(match field {
            ChoiceField::OperationType => {
                Choice::OperationType(parse_optional(clear, trimmed, OperationType::parse)?)
            }
            ChoiceField::ResoldProportion => {
                Choice::ResoldProportion(parse_optional(clear, trimmed, ProportionBucket::parse)?)
            }
            ChoiceField::ChildDirectedPortion => Choice::ChildDirectedPortion(parse_optional(
                clear,
                trimmed,
                ChildDirectedPortion::parse,
            )?),
            ChoiceField::IntermediaryProportion => Choice::IntermediaryProportion(
                parse_optional(clear, trimmed, ProportionBucket::parse)?,
            ),
            ChoiceField::WebPreferredIntegration => Choice::WebPreferredIntegration(
                parse_optional(clear, trimmed, WebIntegrationMethod::parse)?,
            ),
            ChoiceField::CtvPreferredIntegration => Choice::CtvPreferredIntegration(
                parse_optional(clear, trimmed, CtvIntegrationMethod::parse)?,
            ),
            ChoiceField::BurlTiming => {
                Choice::BurlTiming(parse_optional(clear, trimmed, BurlTiming::parse)?)
            }
        })
    }

    pub fn apply_to(self, answers: &mut AnswerSet) {
        match self {
            Choice::OperationType(value) => answers.operation_type = value,
            Choice::ResoldProportion(value) => answers.resold_inventory_proportion = value,
            Choice::ChildDirectedPortion(value) => answers.child_directed_portion = value,
            Choice::IntermediaryProportion(value) => {
                answers.intermediary_info.inventory_proportion = value
            }
            Choice::WebPreferredIntegration(value) => {
                answers.web_technical.preferred_integration = value
            }
            Choice::CtvPreferredIntegration(value) => {
                answers.ctv_app_technical.preferred_integration = value
            }
            Choice::BurlTiming(value) => {
                answers
                    .ctv_app_technical
                    .technical_settings
                    .mobile_app_tracking
                    .burl_timing = value
            }
        }
    }
}

fn parse_optional<T>(
    clear: bool,
    value: &str,
    parse: fn(&str) -> Result<T, DomainError>,
) -> Result<Option<T>, DomainError> {
    if clear {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

keyed_enum! {
    /// Regional traffic breakdowns.
    pub enum TrafficChannel: "traffic channel" {
        WebDisplay => "web-display",
        WebVideo => "web-video",
        CtvInApp => "ctv-in-app",
        CtvStreaming => "ctv-ctv",
    }
}

impl TrafficChannel {
    pub fn breakdown_mut(self, answers: &mut AnswerSet) -> &mut RegionalTraffic {
        match self {
            TrafficChannel::WebDisplay => &mut answers.web_technical.traffic_percentage.display,
            TrafficChannel::WebVideo => &mut answers.web_technical.traffic_percentage.video,
            TrafficChannel::CtvInApp => &mut answers.ctv_app_technical.traffic_percentage.in_app,
            TrafficChannel::CtvStreaming => &mut answers.ctv_app_technical.traffic_percentage.ctv,
        }
    }
}

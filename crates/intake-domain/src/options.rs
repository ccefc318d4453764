//! Closed option vocabularies offered by the questionnaire.

use serde::{Deserialize, Deserializer};

/// Option values stored by their human-readable label.
pub trait LabelledOption: Sized {
    /// Human-readable name of the vocabulary, used in error messages.
    const KIND: &'static str;

    fn label(&self) -> &str;

    /// `false` for values loaded from storage that match no known option.
    fn is_recognized(&self) -> bool;

    /// Maps a stored label (or driver key) to an option, never failing.
    fn from_label(value: &str) -> Self;
}

labelled_options! {
    /// Delivery environments a partner operates in.
    pub enum Environment: "environment" {
        MobileInApp("mobile-in-app") => "Mobile In-App",
        DesktopInApp("desktop-in-app") => "Desktop In-App",
        CtvOtt("ctv-ott") => "CTV/OTT",
        Web("web") => "WEB",
        Ooh("ooh") => "OOH",
    }
}

labelled_options! {
    /// Creative formats a partner supports.
    pub enum AdFormat: "format" {
        Display("display") => "Display",
        Video("video") => "Video",
        InterstitialWeb("interstitial-web") => "Interstitial - WEB",
        InterstitialApp("interstitial-app") => "Interstitial - APP",
        NativeWeb("native-web") => "Native - WEB",
        NativeApp("native-app") => "Native - APP",
    }
}

labelled_options! {
    pub enum OperationType: "operation type" {
        OwnedAndOperated("o-and-o") => "O&O",
        Intermediary("intermediary") => "Intermediary",
        Both("both") => "Both",
    }
}

labelled_options! {
    /// Rough share buckets used for resold and intermediary inventory.
    pub enum ProportionBucket: "proportion" {
        UpToQuarter("0-25") => "0-25",
        UpToHalf("26-50") => "26-50",
        UpToThreeQuarters("51-75") => "51-75",
        UpToAll("76-100") => "76-100",
    }
}

labelled_options! {
    /// Share of the offering directed at children (COPPA exposure).
    pub enum ChildDirectedPortion: "child-directed portion" {
        GeneralAudience("general") => "none",
        UnderQuarter("under-25") => "less25",
        QuarterToHalf("25-50") => "25-50",
        OverHalf("over-50") => "more50",
    }
}

labelled_options! {
    pub enum OwnedOperatedCategory: "owned & operated category" {
        Publisher("publisher") => "Publisher",
        DeviceManufacturer("oem") => "Device Manufacturer (OEM)",
        AppDeveloper("app-developer") => "App Developer",
        VideoDistributor("mvpd") => "MVPD (Multichannel Video Programming Distributor) or FAST Platform",
    }
}

labelled_options! {
    pub enum IntermediaryCategory: "intermediary category" {
        SupplySidePlatform("ssp") => "Supply Side Platform (SSP)",
        TechnologySolution("technology") => "Technology Solution (ex. Server Side Ad-Insertion, Ad Server, etc.)",
        AdNetwork("ad-network") => "Ad Network",
        SupplementalContent("syndication") => "Supplemental Content Solution or Syndication Partner",
        DataEnrichment("data-enrichment") => "Data/Audience Enrichment Vendor",
    }
}

labelled_options! {
    pub enum AppStore: "app store" {
        Apple("apple") => "Apple App Store",
        GooglePlay("google-play") => "Google Play Store",
        Roku("roku") => "Roku Channel Store",
        Samsung("samsung") => "Samsung Apps & Services",
        Playstation("playstation") => "Playstation Store",
        Lg("lg") => "LG Content Store",
        AmazonFire("amazon-fire") => "Amazon Fire Store",
    }
}

labelled_options! {
    pub enum WebIntegrationMethod: "web integration method" {
        Ortb("ortb") => "oRTB - 2.5/2.6",
        Tam("tam") => "TAM",
        Uam("uam") => "UAM",
        HeaderBidding("header-bidding") => "Header Bidding",
        PrebidServer("prebid-server") => "Prebid Server",
        OpenBidding("open-bidding") => "Open Bidding",
        Other("other") => "Other",
    }
}

labelled_options! {
    pub enum CtvIntegrationMethod: "CTV/app integration method" {
        Ortb("ortb") => "oRTB (2.5/2.6)",
        PublicaAdServer("publica") => "Publica Ad Server",
        SpringServe("springserve") => "SpringServe Server-side Header Bidding",
        NimbusAdServer("nimbus") => "Nimbus Ad Server",
        Tam("tam") => "TAM",
        PrebidServer("prebid-server") => "Prebid Server",
        Other("other") => "Other",
    }
}

labelled_options! {
    pub enum DataCenter: "data center" {
        Us("us") => "US",
        Eu("eu") => "EU",
        Apac("apac") => "APAC",
    }
}

labelled_options! {
    pub enum SensitiveCategory: "sensitive category" {
        Pharma("pharma") => "Pharma",
        Gambling("gambling") => "Gambling",
        LdaAdvertisers("lda") => "LDA Advertisers",
        Political("political") => "Political",
    }
}

labelled_options! {
    pub enum ImpressionTracking: "impression tracking method" {
        Adm("adm") => "ADM",
        Burl("burl") => "BURL",
        Nurl("nurl") => "nURL (least preferred)",
    }
}

labelled_options! {
    /// When the billing URL fires for mobile app inventory.
    pub enum BurlTiming: "BURL timing" {
        Render("render") => "render",
        Viewable("viewable") => "viewable",
    }
}

/// Deserializes an optional option value, treating blank strings as unset.
///
/// Older records store unanswered choices as `""` rather than `null`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: LabelledOption,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(|value| T::from_label(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_keys_parse_case_insensitively() {
        assert_eq!(Environment::parse("web").unwrap(), Environment::Web);
        assert_eq!(Environment::parse("Mobile In-App").unwrap(), Environment::MobileInApp);
        assert_eq!(AdFormat::parse("native - app").unwrap(), AdFormat::NativeApp);
        assert!(OperationType::parse("franchise").is_err());
    }

    #[test]
    fn unknown_labels_are_kept_verbatim() {
        let value = Environment::from_label("Smart Fridge");
        assert_eq!(value, Environment::Unrecognized("Smart Fridge".into()));
        assert!(!value.is_recognized());
        assert_eq!(value.label(), "Smart Fridge");
        assert_eq!(value.key(), None);
    }

    #[test]
    fn options_serialize_as_labels() {
        let json = serde_json::to_string(&AdFormat::InterstitialWeb).unwrap();
        assert_eq!(json, "\"Interstitial - WEB\"");
        let parsed: AdFormat = serde_json::from_str("\"Video\"").unwrap();
        assert_eq!(parsed, AdFormat::Video);
    }
}

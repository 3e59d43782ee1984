#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use httpmock::MockServer;
use snp_bridge::application::services::{AuthService, ReportService};
use snp_bridge::domain::entities::{GenomicRegion, SnpCatalog};
use snp_bridge::infrastructure::ga4gh::client::Ga4ghClient;
use snp_bridge::infrastructure::http::HttpSettings;
use snp_bridge::infrastructure::snp_file::parse_catalog;
use snp_bridge::infrastructure::ttam::{OAuthSettings, TtamClient, TtamOAuth};
use snp_bridge::state::{AppState, SiteSettings};
use url::Url;

pub const CLIENT_ID: &str = "test-client";
pub const VARIANT_SET: &str = "brca-hg37";
pub const TOKEN: &str = "tok-123";

/// Two SNPs inside 13:32889600-32973900, one of them at a variant start.
pub const SNP_DATA: &str = "\
# sample
index\tsnp\tchromosome\tchromosome_position
0\trs12913832\t15\t28365618
1\ti4000377\t13\t32890572
2\trs206115\t13\t32970031
";

pub fn catalog() -> SnpCatalog {
    parse_catalog(SNP_DATA.as_bytes()).unwrap()
}

pub fn http_settings() -> HttpSettings {
    HttpSettings {
        timeout: Duration::from_secs(5),
        retries: 0,
        accept_invalid_certs: false,
    }
}

pub fn default_region() -> GenomicRegion {
    GenomicRegion::new("13", 32_889_600, 32_973_900).unwrap()
}

/// Builds state whose 23andMe and GA4GH clients point at the mock servers.
pub fn create_test_state(ttam: &MockServer, ga4gh: &MockServer) -> AppState {
    create_test_state_with(ttam, ga4gh, Some(VARIANT_SET), catalog())
}

pub fn create_test_state_with(
    ttam: &MockServer,
    ga4gh: &MockServer,
    variant_set_id: Option<&str>,
    catalog: SnpCatalog,
) -> AppState {
    let http = http_settings();
    let api_base = Url::parse(&ttam.base_url()).unwrap();

    let oauth = TtamOAuth::new(
        OAuthSettings {
            client_id: CLIENT_ID.to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: Url::parse("http://localhost:5000/app/").unwrap(),
            scopes: vec!["basic".to_string(), "i4000377".to_string()],
            authorize_url: Url::parse(&ttam.url("/authorize")).unwrap(),
            token_url: Url::parse(&ttam.url("/token/")).unwrap(),
            select_profile: false,
        },
        &http,
    )
    .unwrap();
    let ttam_client = TtamClient::new(api_base, &http).unwrap();
    let ga4gh_client = Ga4ghClient::new(Url::parse(&ga4gh.base_url()).unwrap(), &http).unwrap();

    let auth_service = Arc::new(AuthService::new(Arc::new(oauth)));
    let report_service = Arc::new(ReportService::new(
        Arc::new(ttam_client),
        Arc::new(ga4gh_client),
        Arc::new(catalog),
        vec!["rs12913832".to_string()],
    ));

    let site = SiteSettings {
        page_header: "23andMe + GA4GH".to_string(),
        client_id: CLIENT_ID.to_string(),
        home_url: "http://localhost:5000/".to_string(),
        demo_url: "http://localhost:5000/demo/".to_string(),
        variant_set_id: variant_set_id.map(str::to_string),
        default_region: default_region(),
    };

    AppState::new(auth_service, report_service, site)
}

/// Variant search response with one variant at the `i4000377` position and
/// one elsewhere. Positions are strings, as some servers send int64.
pub fn variants_body() -> serde_json::Value {
    serde_json::json!({
        "variants": [
            {
                "id": "v1",
                "variantSetId": VARIANT_SET,
                "names": ["c.-40+1G>A"],
                "referenceName": "13",
                "start": "32890572",
                "end": "32890573",
                "referenceBases": "G",
                "alternateBases": ["A"],
                "attributes": {"attr": {"Pathogenicity": {"values": [{"stringValue": "Benign"}]}}}
            },
            {
                "id": "v2",
                "variantSetId": VARIANT_SET,
                "names": [],
                "referenceName": "13",
                "start": 32900000,
                "end": 32900001,
                "referenceBases": "C",
                "alternateBases": ["T"]
            }
        ],
        "nextPageToken": ""
    })
}

pub fn genotypes_body() -> serde_json::Value {
    serde_json::json!([
        {"id": "profile-1", "i4000377": "GA", "rs12913832": "AA"}
    ])
}

pub fn user_body() -> serde_json::Value {
    serde_json::json!({
        "id": "user-1",
        "profiles": [{"id": "profile-1", "genotyped": true}]
    })
}

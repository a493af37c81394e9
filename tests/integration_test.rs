/// Integration tests for the collection pipeline
mod test_utilities;

use licensegen::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use test_utilities::mocks::*;

// ============================================================================
// Fixtures
// ============================================================================

const APP_MANIFEST: &str = r#"{
    "name": "App",
    "products": [{"name": "App", "targets": ["App"]}],
    "targets": [
        {"name": "App", "dependencies": [{"byName": ["Core", null]}]},
        {"name": "Core", "dependencies": [{"product": ["Networking", "net-pkg", null]}]}
    ],
    "dependencies": [
        {"sourceControl": [{
            "identity": "net-pkg",
            "location": {"remote": ["https://example.com/org/networking.git"]}
        }]}
    ]
}"#;

const NETWORKING_MANIFEST: &str = r#"{
    "name": "Networking",
    "products": [{"name": "Networking", "targets": ["Networking"]}],
    "targets": [{"name": "Networking", "dependencies": []}]
}"#;

/// App -> {Feeds, Profile} -> Shared, each crossing a package boundary
const DIAMOND_MANIFEST: &str = r#"{
    "name": "App",
    "products": [
        {"name": "App", "targets": ["App"]},
        {"name": "AppExtension", "targets": ["Extension"]}
    ],
    "targets": [
        {"name": "App", "dependencies": [
            {"product": ["Feeds", "feeds", null]},
            {"product": ["Profile", "profile", null]}
        ]},
        {"name": "Extension", "dependencies": [{"byName": ["Shared", null]}]}
    ],
    "dependencies": [
        {"sourceControl": [{"identity": "feeds", "location": {"remote": ["https://example.com/feeds.git"]}}]},
        {"sourceControl": [{"identity": "profile", "location": {"remote": ["https://example.com/profile.git"]}}]},
        {"sourceControl": [{"identity": "shared", "location": {"remote": ["https://example.com/Shared.git"]}}]}
    ]
}"#;

const FEEDS_MANIFEST: &str = r#"{
    "name": "Feeds",
    "products": [{"name": "Feeds", "targets": ["Feeds"]}],
    "targets": [{"name": "Feeds", "dependencies": [{"product": ["Shared", "shared", null]}]}],
    "dependencies": [
        {"sourceControl": [{"identity": "shared", "location": {"remote": ["https://example.com/Shared.git"]}}]}
    ]
}"#;

const PROFILE_MANIFEST: &str = r#"{
    "name": "Profile",
    "products": [{"name": "Profile", "targets": ["Profile"]}],
    "targets": [{"name": "Profile", "dependencies": [{"product": ["Shared", null]}]}],
    "dependencies": [
        {"sourceControl": [{"identity": "shared", "location": {"remote": ["https://example.com/Shared.git"]}}]}
    ]
}"#;

const SHARED_MANIFEST: &str = r#"{
    "name": "Shared",
    "products": [{"name": "Shared", "targets": ["Shared"]}],
    "targets": [
        {"name": "Shared", "dependencies": [{"target": ["SharedCore", null]}]},
        {"name": "SharedCore", "dependencies": []}
    ]
}"#;

fn checkouts(names: &[&str]) -> Vec<Checkout> {
    names
        .iter()
        .map(|n| Checkout::new(PathBuf::from(format!("/checkouts/{}", n))))
        .collect()
}

fn library(checkout: &str, name: &str) -> Library {
    Library::new(Checkout::new(PathBuf::from(format!("/checkouts/{}", checkout))), name)
}

fn diamond_source() -> MockManifestSource {
    MockManifestSource::new()
        .with_manifest("/root/App", DIAMOND_MANIFEST)
        .with_manifest("/checkouts/feeds", FEEDS_MANIFEST)
        .with_manifest("/checkouts/profile", PROFILE_MANIFEST)
        .with_manifest("/checkouts/Shared", SHARED_MANIFEST)
}

// ============================================================================
// Collector
// ============================================================================

#[tokio::test]
async fn test_internal_target_reaches_external_product() {
    let source = MockManifestSource::new()
        .with_manifest("/root/App", APP_MANIFEST)
        .with_manifest("/checkouts/networking", NETWORKING_MANIFEST);
    let collector = DependencyCollector::new(Arc::new(source), Arc::new(MockProgressReporter::new()));

    let libraries = collector
        .collect(Path::new("/root/App"), &checkouts(&["networking"]), "5.6.0")
        .await
        .unwrap();

    let expected: HashSet<Library> = [library("networking", "Networking")].into_iter().collect();
    assert_eq!(libraries, expected);
}

#[tokio::test]
async fn test_each_package_is_dumped_once() {
    let source = Arc::new(diamond_source().with_jitter(7));
    let collector = DependencyCollector::new(Arc::clone(&source), Arc::new(MockProgressReporter::new()));

    let libraries = collector
        .collect(
            Path::new("/root/App"),
            &checkouts(&["feeds", "profile", "Shared"]),
            "5.6.0",
        )
        .await
        .unwrap();

    assert_eq!(libraries.len(), 3);
    assert_eq!(source.calls_for("/root/App"), 1);
    assert_eq!(source.calls_for("/checkouts/feeds"), 1);
    assert_eq!(source.calls_for("/checkouts/profile"), 1);
    assert_eq!(source.calls_for("/checkouts/Shared"), 1);
    assert_eq!(source.total_calls(), 4);
}

#[tokio::test]
async fn test_result_is_independent_of_completion_order() {
    let expected: HashSet<Library> = [
        library("feeds", "Feeds"),
        library("profile", "Profile"),
        library("Shared", "Shared"),
    ]
    .into_iter()
    .collect();

    for seed in 0..16 {
        let collector = DependencyCollector::new(
            Arc::new(diamond_source().with_jitter(seed)),
            Arc::new(MockProgressReporter::new()),
        );
        let libraries = collector
            .collect(
                Path::new("/root/App"),
                &checkouts(&["feeds", "profile", "Shared"]),
                "5.6.0",
            )
            .await
            .unwrap();
        assert_eq!(libraries, expected, "seed {}", seed);
    }
}

#[tokio::test]
async fn test_package_cycle_terminates() {
    let ping = r#"{
        "name": "Ping",
        "products": [{"name": "Ping", "targets": ["Ping"]}],
        "targets": [{"name": "Ping", "dependencies": [{"product": ["Pong", "pong", null]}]}],
        "dependencies": [{"sourceControl": [{"identity": "pong", "location": {"remote": ["https://example.com/pong.git"]}}]}]
    }"#;
    let pong = r#"{
        "name": "Pong",
        "products": [{"name": "Pong", "targets": ["Pong"]}],
        "targets": [
            {"name": "Pong", "dependencies": [{"target": ["PongCore", null]}]},
            {"name": "PongCore", "dependencies": [
                {"target": ["Pong", null]},
                {"product": ["Ping", "ping", null]}
            ]}
        ],
        "dependencies": [{"sourceControl": [{"identity": "ping", "location": {"remote": ["https://example.com/ping.git"]}}]}]
    }"#;
    let source = Arc::new(
        MockManifestSource::new()
            .with_manifest("/checkouts/ping", ping)
            .with_manifest("/checkouts/pong", pong)
            .with_jitter(3),
    );
    let collector = DependencyCollector::new(Arc::clone(&source), Arc::new(MockProgressReporter::new()));

    let libraries = collector
        .collect(Path::new("/checkouts/ping"), &checkouts(&["ping", "pong"]), "5.6.0")
        .await
        .unwrap();

    let expected: HashSet<Library> = [library("pong", "Pong"), library("ping", "Ping")]
        .into_iter()
        .collect();
    assert_eq!(libraries, expected);
    assert_eq!(source.calls_for("/checkouts/ping"), 1);
    assert_eq!(source.calls_for("/checkouts/pong"), 1);
}

#[tokio::test]
async fn test_unexported_product_warns_and_strict_mode_fails() {
    let app = r#"{
        "name": "App",
        "products": [{"name": "App", "targets": ["App"]}],
        "targets": [{"name": "App", "dependencies": [{"product": ["Ghost", "networking", null]}]}]
    }"#;
    let source = Arc::new(
        MockManifestSource::new()
            .with_manifest("/root/App", app)
            .with_manifest("/checkouts/networking", NETWORKING_MANIFEST),
    );
    let reporter = Arc::new(MockProgressReporter::new());

    let lenient = DependencyCollector::new(Arc::clone(&source), Arc::clone(&reporter));
    let libraries = lenient
        .collect(Path::new("/root/App"), &checkouts(&["networking"]), "5.6.0")
        .await
        .unwrap();
    assert_eq!(libraries.len(), 1);
    assert!(reporter
        .get_errors()
        .iter()
        .any(|e| e.contains("does not export product Ghost")));

    let strict = DependencyCollector::new(source, reporter).strict(true);
    let err = strict
        .collect(Path::new("/root/App"), &checkouts(&["networking"]), "5.6.0")
        .await
        .unwrap_err();
    assert!(format!("{}", err).contains("Missing libraries: Ghost"));
}

#[tokio::test]
async fn test_tool_failure_propagates() {
    let source = MockManifestSource::new().with_manifest("/root/App", APP_MANIFEST);
    let collector = DependencyCollector::new(Arc::new(source), Arc::new(MockProgressReporter::new()));

    // the networking checkout exists on disk but has no manifest fixture
    let err = collector
        .collect(Path::new("/root/App"), &checkouts(&["networking"]), "5.6.0")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LicenseGenError>(),
        Some(LicenseGenError::ToolInvocation { .. })
    ));
}

// ============================================================================
// Dialects
// ============================================================================

#[tokio::test]
async fn test_all_dialects_collect_the_same_libraries() {
    let targets = r#"
        "products": [{"name": "App", "targets": ["App"]}],
        "targets": [{"name": "App", "dependencies": [{"product": ["Logging", "swift-log", null]}]}]
    "#;
    let baseline = format!(
        r#"{{"name": "App", {}, "dependencies": [{{"name": "swift-log", "url": "https://github.com/apple/swift-log.git"}}]}}"#,
        targets
    );
    let mid = format!(
        r#"{{"name": "App", {}, "dependencies": [{{"scm": [{{"identity": "swift-log", "location": "https://github.com/apple/swift-log.git"}}]}}]}}"#,
        targets
    );
    let current = format!(
        r#"{{"name": "App", {}, "dependencies": [{{"sourceControl": [{{"identity": "swift-log", "location": {{"remote": [{{"urlString": "https://github.com/apple/swift-log.git"}}]}}}}]}}]}}"#,
        targets
    );
    let logging = r#"{
        "name": "swift-log",
        "products": [{"name": "Logging", "targets": ["Logging"]}],
        "targets": [{"name": "Logging", "dependencies": []}]
    }"#;

    for (version, manifest) in [("5.3.2", baseline), ("5.5.0", mid), ("5.9.0", current)] {
        let source = MockManifestSource::new()
            .with_manifest("/root/App", &manifest)
            .with_manifest("/checkouts/swift-log", logging);
        let collector =
            DependencyCollector::new(Arc::new(source), Arc::new(MockProgressReporter::new()));

        let libraries = collector
            .collect(Path::new("/root/App"), &checkouts(&["swift-log"]), version)
            .await
            .unwrap();

        let expected: HashSet<Library> = [library("swift-log", "Logging")].into_iter().collect();
        assert_eq!(libraries, expected, "tool version {}", version);
    }
}

// ============================================================================
// Checkout index and license resolution
// ============================================================================

#[test]
fn test_checkout_index_first_root_wins() {
    let file_system = InMemoryFileSystem::new()
        .with_directory("/derived/checkouts/swift-log")
        .with_directory("/derived/checkouts/Alamofire")
        .with_directory("/vendored/swift-log")
        .with_directory("/vendored/Yams")
        .with_file("/vendored/README.md", "not a checkout");

    let checkouts = CheckoutIndex::find_checkouts(
        &file_system,
        &[PathBuf::from("/derived/checkouts"), PathBuf::from("/vendored")],
    )
    .unwrap();

    let paths: Vec<&Path> = checkouts.iter().map(|c| c.path()).collect();
    assert_eq!(
        paths,
        vec![
            Path::new("/derived/checkouts/Alamofire"),
            Path::new("/vendored/Yams"),
            Path::new("/derived/checkouts/swift-log"),
        ]
    );
}

#[test]
fn test_license_md_is_found_without_license() {
    let file_system =
        InMemoryFileSystem::new().with_file("/checkouts/Yams/LICENSE.md", "The MIT License");
    let reporter = MockProgressReporter::new();
    let yams = library("Yams", "Yams");

    let license = LicenseResolver::new(&file_system, &reporter)
        .resolve(&yams, &mut LicenseModifiers::default())
        .unwrap()
        .unwrap();

    assert_eq!(license.body(), "The MIT License");
}

#[test]
fn test_ignored_library_never_touches_the_filesystem() {
    let file_system = InMemoryFileSystem::new().with_file("/checkouts/Yams/LICENSE", "MIT");
    let reporter = MockProgressReporter::new();
    let mut modifiers: LicenseModifiers =
        [("Yams".to_string(), LicenseModifier::Ignore)].into_iter().collect();

    let license = LicenseResolver::new(&file_system, &reporter)
        .resolve(&library("Yams", "Yams"), &mut modifiers)
        .unwrap();

    assert!(license.is_none());
    assert!(file_system.probed_paths().is_empty());
}

// ============================================================================
// Use case
// ============================================================================

const CONFIGURED_APP_MANIFEST: &str = r#"{
    "name": "App",
    "products": [{"name": "App", "targets": ["App"]}],
    "targets": [{"name": "App", "dependencies": [
        {"byName": ["LegacyLib", null]},
        {"byName": ["OtherLib", null]}
    ]}]
}"#;

fn configured_source() -> MockManifestSource {
    let leaf = |name: &str| {
        format!(
            r#"{{"name": "{0}", "products": [{{"name": "{0}", "targets": ["{0}"]}}], "targets": [{{"name": "{0}", "dependencies": []}}]}}"#,
            name
        )
    };
    MockManifestSource::new()
        .with_manifest("/root/App", CONFIGURED_APP_MANIFEST)
        .with_manifest("/checkouts/LegacyLib", &leaf("LegacyLib"))
        .with_manifest("/checkouts/OtherLib", &leaf("OtherLib"))
}

fn configured_modifiers() -> LicenseModifiers {
    [
        ("LegacyLib".to_string(), LicenseModifier::Ignore),
        (
            "OtherLib".to_string(),
            LicenseModifier::LicensePath(PathBuf::from("licenses/OTHER.txt")),
        ),
    ]
    .into_iter()
    .collect()
}

fn configured_request() -> LicenseRequest {
    LicenseRequest::new(vec![PathBuf::from("/checkouts")], vec![PathBuf::from("/root/App")])
}

#[tokio::test]
async fn test_config_ignores_and_redirects_licenses() {
    let file_system = InMemoryFileSystem::new()
        .with_directory("/root/App")
        .with_file("/checkouts/LegacyLib/LICENSE", "legacy")
        .with_file("/checkouts/OtherLib/LICENSE", "checkout copy")
        .with_file("licenses/OTHER.txt", "configured copy");
    let use_case = GenerateLicensesUseCase::new(
        file_system,
        Arc::new(configured_source()),
        Arc::new(MockProgressReporter::new()),
    );

    let response = use_case
        .execute(configured_request(), configured_modifiers())
        .await
        .unwrap();

    assert_eq!(response.licenses.len(), 1);
    assert_eq!(response.licenses[0].name(), "OtherLib");
    assert_eq!(response.licenses[0].body(), "configured copy");
    assert!(response.unused_modifiers.is_empty());
}

#[tokio::test]
async fn test_missing_configured_license_is_fatal() {
    let file_system = InMemoryFileSystem::new()
        .with_directory("/root/App")
        .with_file("/checkouts/LegacyLib/LICENSE", "legacy")
        .with_file("/checkouts/OtherLib/LICENSE", "checkout copy");
    let use_case = GenerateLicensesUseCase::new(
        file_system,
        Arc::new(configured_source()),
        Arc::new(MockProgressReporter::new()),
    );

    let err = use_case
        .execute(configured_request(), configured_modifiers())
        .await
        .unwrap_err();

    match err.downcast_ref::<LicenseGenError>() {
        Some(LicenseGenError::MissingLicense { library, path }) => {
            assert_eq!(library, "OtherLib");
            assert_eq!(path, Path::new("licenses/OTHER.txt"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_licenses_are_sorted_and_progress_is_reported() {
    let file_system = InMemoryFileSystem::new()
        .with_file("/checkouts/swift-log/LICENSE.txt", "Apache")
        .with_file("/checkouts/Alamofire/LICENSE", "MIT")
        .with_directory("/checkouts/NoLicense");
    let reporter = Arc::new(MockProgressReporter::new());
    let use_case = GenerateLicensesUseCase::new(
        file_system,
        Arc::new(MockManifestSource::new()),
        Arc::clone(&reporter),
    );

    let response = use_case
        .execute(
            LicenseRequest::new(vec![PathBuf::from("/checkouts")], vec![]),
            LicenseModifiers::default(),
        )
        .await
        .unwrap();

    let names: Vec<&str> = response.licenses.iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["Alamofire", "swift-log"]);
    let messages = reporter.get_messages();
    assert!(messages.contains(&"Progress: 3/3 - swift-log".to_string()));
    assert!(reporter
        .get_errors()
        .iter()
        .any(|e| e.contains("no license file found for NoLicense")));
}

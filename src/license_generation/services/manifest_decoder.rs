use crate::license_generation::domain::{
    Manifest, PackageDependency, Product, Target, TargetDependency,
};
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use version_compare::Cmp;

type DecodeFn = fn(&[u8]) -> Result<Manifest>;

/// One historical `dump-package` schema and the oldest tool version emitting it
struct Dialect {
    floor: &'static str,
    decode: DecodeFn,
}

/// Oldest first. The newest dialect whose floor is <= the tool version wins.
static DIALECTS: [Dialect; 3] = [
    Dialect {
        floor: "5.3",
        decode: decode_baseline,
    },
    Dialect {
        floor: "5.5",
        decode: decode_mid,
    },
    Dialect {
        floor: "5.6",
        decode: decode_current,
    },
];

/// ManifestDecoder turns raw introspection output into a `Manifest`
///
/// The dialect is fixed at construction from the detected tool version;
/// versions older than every floor fall back to the baseline dialect.
#[derive(Clone, Copy)]
pub struct ManifestDecoder {
    dialect: &'static Dialect,
}

impl ManifestDecoder {
    pub fn for_tool_version(tool_version: &str) -> Self {
        let dialect = DIALECTS
            .iter()
            .rev()
            .find(|d| {
                version_compare::compare_to(tool_version, d.floor, Cmp::Ge).unwrap_or(false)
            })
            .unwrap_or(&DIALECTS[0]);
        Self { dialect }
    }

    /// Floor version of the selected dialect
    pub fn dialect_floor(&self) -> &'static str {
        self.dialect.floor
    }

    /// Decodes a `dump-package` payload
    ///
    /// # Errors
    /// Returns an error if the payload is not valid JSON for this dialect,
    /// including target dependencies of an unrecognized shape
    pub fn decode(&self, data: &[u8]) -> Result<Manifest> {
        (self.dialect.decode)(data)
    }
}

impl std::fmt::Debug for ManifestDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestDecoder")
            .field("dialect", &self.dialect.floor)
            .finish()
    }
}

// ============================================================================
// Shared wire shapes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(bound = "D: DeserializeOwned")]
struct RawManifest<D> {
    name: String,
    #[serde(default)]
    products: Vec<RawProduct>,
    #[serde(default)]
    targets: Vec<RawTarget>,
    #[serde(default)]
    dependencies: Vec<D>,
}

impl<D> RawManifest<D> {
    fn into_manifest(self, dependencies: Vec<PackageDependency>) -> Manifest {
        Manifest::new(
            self.name,
            self.products
                .into_iter()
                .map(|p| Product::new(p.name, p.targets))
                .collect(),
            self.targets
                .into_iter()
                .map(|t| {
                    Target::new(
                        t.name,
                        t.dependencies.into_iter().map(|d| d.0).collect(),
                    )
                })
                .collect(),
            dependencies,
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    name: String,
    #[serde(default)]
    targets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    name: String,
    #[serde(default)]
    dependencies: Vec<DecodedTargetDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawTargetDependency")]
struct DecodedTargetDependency(TargetDependency);

/// `{"target": [name, ...]}`, `{"product": [name, package?, ...]}` or `{"byName": [name, ...]}`
#[derive(Debug, Deserialize)]
struct RawTargetDependency {
    #[serde(default)]
    target: Option<Vec<Value>>,
    #[serde(default)]
    product: Option<Vec<Value>>,
    #[serde(default, rename = "byName")]
    by_name: Option<Vec<Value>>,
}

impl TryFrom<RawTargetDependency> for DecodedTargetDependency {
    type Error = String;

    fn try_from(raw: RawTargetDependency) -> std::result::Result<Self, Self::Error> {
        fn name_of(kind: &str, values: &[Value]) -> std::result::Result<String, String> {
            values
                .first()
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or_else(|| format!("`{}` dependency must start with a name", kind))
        }

        let dependency = if let Some(values) = raw.target {
            TargetDependency::Target(name_of("target", &values)?)
        } else if let Some(values) = raw.product {
            TargetDependency::Product {
                name: name_of("product", &values)?,
                package: values.get(1).and_then(Value::as_str).map(String::from),
            }
        } else if let Some(values) = raw.by_name {
            TargetDependency::ByName(name_of("byName", &values)?)
        } else {
            return Err(
                "Did not find a matching key for target dependency (expected `target`, `product` or `byName`)"
                    .to_string(),
            );
        };
        Ok(DecodedTargetDependency(dependency))
    }
}

// ============================================================================
// Baseline dialect: flat `{name, url}` dependencies
// ============================================================================

#[derive(Debug, Deserialize)]
struct BaselineDependency {
    name: String,
    url: String,
}

fn decode_baseline(data: &[u8]) -> Result<Manifest> {
    let mut raw: RawManifest<BaselineDependency> = serde_json::from_slice(data)?;
    let dependencies = std::mem::take(&mut raw.dependencies)
        .into_iter()
        .map(|d| PackageDependency::new(d.name, None, d.url))
        .collect();
    Ok(raw.into_manifest(dependencies))
}

// ============================================================================
// Mid dialect: `[{kind: [{identity, name?, location: url}]}]`
// ============================================================================

#[derive(Debug, Deserialize)]
struct MidDependency {
    identity: String,
    #[serde(default)]
    name: Option<String>,
    location: String,
}

fn decode_mid(data: &[u8]) -> Result<Manifest> {
    let mut raw: RawManifest<BTreeMap<String, Vec<MidDependency>>> =
        serde_json::from_slice(data)?;
    let dependencies = std::mem::take(&mut raw.dependencies)
        .into_iter()
        .flat_map(|by_kind| by_kind.into_values())
        .flatten()
        .map(|d| PackageDependency::new(d.identity, d.name, d.location))
        .collect();
    Ok(raw.into_manifest(dependencies))
}

// ============================================================================
// Current dialect: like mid, but `location` is `{remote: [url]?, local: [url]?}`
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawCurrentDependency")]
struct CurrentDependency(PackageDependency);

#[derive(Debug, Deserialize)]
struct RawCurrentDependency {
    identity: String,
    #[serde(default, alias = "nameForTargetDependencyResolutionOnly")]
    name: Option<String>,
    location: CurrentLocation,
}

#[derive(Debug, Deserialize)]
struct CurrentLocation {
    #[serde(default)]
    remote: Option<Vec<LocationUrl>>,
    #[serde(default)]
    local: Option<Vec<LocationUrl>>,
}

/// Newer tools wrap each remote URL as `{"urlString": ...}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocationUrl {
    Plain(String),
    Wrapped {
        #[serde(rename = "urlString")]
        url_string: String,
    },
}

impl LocationUrl {
    fn into_string(self) -> String {
        match self {
            LocationUrl::Plain(url) => url,
            LocationUrl::Wrapped { url_string } => url_string,
        }
    }
}

impl TryFrom<RawCurrentDependency> for CurrentDependency {
    type Error = String;

    fn try_from(raw: RawCurrentDependency) -> std::result::Result<Self, Self::Error> {
        let first = |urls: Option<Vec<LocationUrl>>| urls.and_then(|u| u.into_iter().next());
        let url = first(raw.location.remote)
            .or_else(|| first(raw.location.local))
            .map(LocationUrl::into_string)
            .ok_or_else(|| format!("dependency `{}` has no remote or local location", raw.identity))?;
        Ok(CurrentDependency(PackageDependency::new(
            raw.identity,
            raw.name,
            url,
        )))
    }
}

fn decode_current(data: &[u8]) -> Result<Manifest> {
    let mut raw: RawManifest<BTreeMap<String, Vec<CurrentDependency>>> =
        serde_json::from_slice(data)?;
    let dependencies = std::mem::take(&mut raw.dependencies)
        .into_iter()
        .flat_map(|by_kind| by_kind.into_values())
        .flatten()
        .map(|d| d.0)
        .collect();
    Ok(raw.into_manifest(dependencies))
}

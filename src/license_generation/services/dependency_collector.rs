use super::manifest_cache::ManifestCache;
use super::manifest_decoder::ManifestDecoder;
use crate::license_generation::domain::{Checkout, Library, Manifest, TargetDependency};
use crate::ports::outbound::{ManifestSource, ProgressReporter};
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use dashmap::DashSet;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// DependencyCollector computes the dependency closure of a root package
///
/// Starting from every product of the root manifest, it walks targets and
/// their dependencies, crossing into checkouts whenever a dependency names
/// an external package. Each crossing runs as its own task; manifests are
/// shared through a `ManifestCache` so a package is introspected once.
///
/// # Unreachable products
/// A product whose checkout cannot be found, or whose package exports no
/// product or target of that name, is reported as a warning and skipped.
/// With `strict(true)` the run fails with `MissingLibrary` instead, naming
/// every unreachable product.
pub struct DependencyCollector<MS: ?Sized, PR: ?Sized> {
    source: Arc<MS>,
    reporter: Arc<PR>,
    strict: bool,
}

impl<MS, PR> DependencyCollector<MS, PR>
where
    MS: ManifestSource + ?Sized + 'static,
    PR: ProgressReporter + ?Sized + 'static,
{
    pub fn new(source: Arc<MS>, reporter: Arc<PR>) -> Self {
        Self {
            source,
            reporter,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Collects the libraries reachable from the package at `root`
    ///
    /// # Arguments
    /// * `root` - Directory of the root package
    /// * `checkouts` - Known checkouts, as returned by `CheckoutIndex`
    /// * `tool_version` - Detected tool version, selects the manifest dialect
    ///
    /// # Errors
    /// - Tool invocation and manifest decode failures, from any branch
    /// - `MissingLibrary` in strict mode when a product is unreachable
    pub async fn collect(
        &self,
        root: &Path,
        checkouts: &[Checkout],
        tool_version: &str,
    ) -> Result<HashSet<Library>> {
        let decoder = ManifestDecoder::for_tool_version(tool_version);
        self.reporter.report(&format!(
            "🔍 Collecting dependencies of {} (manifest dialect {})",
            root.display(),
            decoder.dialect_floor()
        ));

        let traversal = Arc::new(Traversal {
            cache: ManifestCache::new(Arc::clone(&self.source), decoder),
            checkouts: checkouts
                .iter()
                .map(|c| (c.lookup_key(), c.clone()))
                .collect(),
            reporter: Arc::clone(&self.reporter),
            visited: DashSet::new(),
            libraries: DashSet::new(),
            unreachable: DashSet::new(),
        });

        Arc::clone(&traversal)
            .visit_package(root.to_path_buf(), None)
            .await?;

        if self.strict && !traversal.unreachable.is_empty() {
            let mut names: Vec<String> = traversal.unreachable.iter().map(|n| n.key().clone()).collect();
            names.sort();
            return Err(LicenseGenError::MissingLibrary { names }.into());
        }

        let libraries: HashSet<Library> = traversal.libraries.iter().map(|l| l.key().clone()).collect();
        self.reporter.report(&format!(
            "   Reached {} libraries across {} packages",
            libraries.len(),
            traversal.cache.len()
        ));
        Ok(libraries)
    }
}

/// State shared by every branch of one `collect` call
struct Traversal<MS: ?Sized, PR: ?Sized> {
    cache: ManifestCache<MS>,
    checkouts: HashMap<String, Checkout>,
    reporter: Arc<PR>,
    /// (target name, owning package name)
    visited: DashSet<(String, String)>,
    libraries: DashSet<Library>,
    unreachable: DashSet<String>,
}

/// A cross-package step discovered while walking one package
struct Crossing {
    package_path: PathBuf,
    product: String,
}

impl<MS, PR> Traversal<MS, PR>
where
    MS: ManifestSource + ?Sized + 'static,
    PR: ProgressReporter + ?Sized + 'static,
{
    /// Visits a package. Unscoped visits seed one branch per product;
    /// scoped visits only walk the targets behind `scope`.
    fn visit_package(
        self: Arc<Self>,
        package_path: PathBuf,
        scope: Option<String>,
    ) -> BoxFuture<'static, Result<()>> {
        async move {
            let manifest = self.cache.manifest(&package_path).await?;

            match scope {
                None => {
                    let mut branches = JoinSet::new();
                    for product in &manifest.products {
                        branches.spawn(
                            Arc::clone(&self).walk(Arc::clone(&manifest), product.targets.clone()),
                        );
                    }
                    join_all(branches).await
                }
                Some(product) => {
                    let seeds = if let Some(p) = manifest.product(&product) {
                        p.targets.clone()
                    } else if manifest.has_target(&product) {
                        vec![product]
                    } else {
                        self.reporter.report_error(&format!(
                            "⚠️  Warning: {} does not export product {}, skipping",
                            manifest.name, product
                        ));
                        self.unreachable.insert(product);
                        return Ok(());
                    };
                    self.walk(manifest, seeds).await
                }
            }
        }
        .boxed()
    }

    /// Walks the targets of one package from `seeds`, then visits every
    /// package crossed into and waits for all of them
    fn walk(self: Arc<Self>, manifest: Arc<Manifest>, seeds: Vec<String>) -> BoxFuture<'static, Result<()>> {
        async move {
            let crossings = self.walk_targets(&manifest, seeds);

            let mut branches = JoinSet::new();
            for crossing in crossings {
                branches.spawn(
                    Arc::clone(&self).visit_package(crossing.package_path, Some(crossing.product)),
                );
            }
            join_all(branches).await
        }
        .boxed()
    }

    fn walk_targets(&self, manifest: &Manifest, seeds: Vec<String>) -> Vec<Crossing> {
        let mut work = seeds;
        let mut crossings = Vec::new();

        while let Some(target_name) = work.pop() {
            if !self
                .visited
                .insert((target_name.clone(), manifest.name.clone()))
            {
                continue;
            }
            let Some(target) = manifest.target(&target_name) else {
                continue;
            };

            for dependency in &target.dependencies {
                match dependency {
                    TargetDependency::ByName(name) => {
                        if let Some(checkout) = self.external_checkout(manifest, name) {
                            self.record(checkout, name, &mut crossings);
                        } else if let Some(own) = self.self_export(manifest, name) {
                            self.libraries.insert(Library::new(own.clone(), name.clone()));
                            work.push(name.clone());
                        } else {
                            work.push(name.clone());
                        }
                    }
                    TargetDependency::Target(name) => work.push(name.clone()),
                    TargetDependency::Product { name, package } => {
                        match self.product_checkout(manifest, name, package.as_deref()) {
                            Some(checkout) => self.record(checkout, name, &mut crossings),
                            None => {
                                self.reporter.report_error(&format!(
                                    "⚠️  Warning: no checkout found for product {} of package {}, skipping",
                                    name,
                                    package.as_deref().unwrap_or(name)
                                ));
                                self.unreachable.insert(name.clone());
                            }
                        }
                    }
                }
            }
        }

        crossings
    }

    fn record(&self, checkout: &Checkout, name: &str, crossings: &mut Vec<Crossing>) {
        self.libraries
            .insert(Library::new(checkout.clone(), name.to_string()));
        crossings.push(Crossing {
            package_path: checkout.path().to_path_buf(),
            product: name.to_string(),
        });
    }

    /// A by-name reference is external only if no local target explains it
    fn external_checkout(&self, manifest: &Manifest, name: &str) -> Option<&Checkout> {
        if manifest.has_target(name) {
            return None;
        }
        self.checkouts.get(&name.to_lowercase())
    }

    /// Checkout of the current package, when `name` is one of its own products
    fn self_export(&self, manifest: &Manifest, name: &str) -> Option<&Checkout> {
        if !manifest.has_product(name) {
            return None;
        }
        self.checkouts.get(&manifest.name.to_lowercase())
    }

    /// Finds the checkout of the package exporting `product`
    ///
    /// The package reference (or the product name when absent) is matched
    /// against the declared dependencies; their checkout directory name,
    /// identity and display name are tried in that order before falling
    /// back to the reference itself.
    fn product_checkout(
        &self,
        manifest: &Manifest,
        product: &str,
        package: Option<&str>,
    ) -> Option<&Checkout> {
        let reference = package.unwrap_or(product);
        let mut candidates: Vec<&str> = Vec::new();
        if let Some(declared) = manifest.dependencies.iter().find(|d| d.matches(reference)) {
            candidates.extend([
                declared.checkout_name(),
                declared.identity.as_str(),
                declared.display_name.as_str(),
            ]);
        }
        candidates.push(reference);

        candidates
            .into_iter()
            .find_map(|candidate| self.checkouts.get(&candidate.to_lowercase()))
    }
}

/// Waits for every branch. Returning early drops the set, which aborts
/// the remaining siblings.
async fn join_all(mut branches: JoinSet<Result<()>>) -> Result<()> {
    while let Some(joined) = branches.join_next().await {
        joined??;
    }
    Ok(())
}

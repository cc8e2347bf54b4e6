//! Install/update/uninstall decisions for resolved platform packages.

use serde::Serialize;
use std::fmt;

use super::installed::InstalledRepository;
use super::platform_package::{PlatformPackage, split_platform_package_name};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Operation {
    Install {
        package: PlatformPackage,
    },
    Update {
        from: String,
        package: PlatformPackage,
    },
    Unchanged {
        package: PlatformPackage,
    },
    Uninstall {
        name: String,
        version: String,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Install { package } => {
                write!(f, "install {} ({})", package.name, package.pretty_version)
            }
            Operation::Update { from, package } => write!(
                f,
                "update {} ({} => {})",
                package.name, from, package.pretty_version
            ),
            Operation::Unchanged { package } => {
                write!(f, "unchanged {} ({})", package.name, package.pretty_version)
            }
            Operation::Uninstall { name, version } => write!(f, "uninstall {} ({})", name, version),
        }
    }
}

/// Compare declared platform packages with what is installed.
///
/// A declared package is updated when its normalized version or its dist URL
/// differs from the installed record. An installed `<parent>--<suffix>`
/// record is uninstalled when `parent` is one of `parents` and the record is
/// no longer declared. Declared packages come first, in declaration order,
/// then uninstalls in installed order.
pub fn plan(
    declared: &[PlatformPackage],
    installed: &InstalledRepository,
    parents: &[&str],
) -> Vec<Operation> {
    let mut operations: Vec<Operation> = declared
        .iter()
        .map(|package| match installed.find(&package.name) {
            None => Operation::Install {
                package: package.clone(),
            },
            Some(record) => {
                let version_changed = record
                    .version()
                    .map(|v| v != package.version)
                    .unwrap_or(true);
                let url_changed = record
                    .dist
                    .as_ref()
                    .and_then(|d| d.url.as_deref())
                    .is_some_and(|url| url != package.dist.url);

                if version_changed || url_changed {
                    Operation::Update {
                        from: record.pretty_version().to_string(),
                        package: package.clone(),
                    }
                } else {
                    Operation::Unchanged {
                        package: package.clone(),
                    }
                }
            }
        })
        .collect();

    let stale = installed
        .packages()
        .iter()
        .filter(|record| {
            split_platform_package_name(&record.name).is_some_and(|(parent, _)| {
                parents.iter().any(|p| p.eq_ignore_ascii_case(parent))
            })
        })
        .filter(|record| {
            !declared
                .iter()
                .any(|package| package.name.eq_ignore_ascii_case(&record.name))
        })
        .map(|record| Operation::Uninstall {
            name: record.name.clone(),
            version: record.pretty_version().to_string(),
        });
    operations.extend(stale);

    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveKind;
    use crate::package::Dist;

    fn declared(name: &str, pretty: &str, version: &str, url: &str) -> PlatformPackage {
        PlatformPackage {
            name: name.into(),
            pretty_version: pretty.into(),
            version: version.into(),
            package_type: "library".into(),
            installation_source: "dist".into(),
            dist: Dist {
                kind: ArchiveKind::Zip,
                url: url.into(),
            },
        }
    }

    fn installed() -> InstalledRepository {
        InstalledRepository::from_json(
            r#"[
                { "name": "acme/app--old", "version": "0.1.0" },
                { "name": "acme/app--lib", "version": "1.0.0",
                  "dist": { "type": "zip", "url": "https://example.com/lib-1.0.0.zip" } },
                { "name": "acme/app--tool", "version": "2.0.0",
                  "dist": { "type": "zip", "url": "https://example.com/tool-linux.zip" } },
                { "name": "psr/log", "version": "3.0.0" }
            ]"#,
            "/vendor/composer",
        )
        .unwrap()
    }

    #[test]
    fn test_plan_operations() {
        let packages = vec![
            declared("acme/app--new", "1.0.0", "1.0.0.0", "https://example.com/new.zip"),
            declared("acme/app--lib", "1.1.0", "1.1.0.0", "https://example.com/lib-1.1.0.zip"),
            declared("acme/app--tool", "2.0.0", "2.0.0.0", "https://example.com/tool-linux.zip"),
        ];

        let operations = plan(&packages, &installed(), &["acme/app"]);
        let lines: Vec<String> = operations.iter().map(|op| op.to_string()).collect();

        assert_eq!(
            lines,
            vec![
                "install acme/app--new (1.0.0)",
                "update acme/app--lib (1.0.0 => 1.1.0)",
                "unchanged acme/app--tool (2.0.0)",
                "uninstall acme/app--old (0.1.0)",
            ]
        );
    }

    #[test]
    fn test_plan_updates_when_only_url_changes() {
        let packages = vec![declared(
            "acme/app--tool",
            "2.0.0",
            "2.0.0.0",
            "https://example.com/tool-darwin.zip",
        )];

        let operations = plan(&packages, &installed(), &["acme/app"]);
        assert!(matches!(&operations[0], Operation::Update { from, .. } if from == "2.0.0"));
    }

    #[test]
    fn test_plan_with_nothing_installed() {
        let packages = vec![declared("acme/app--lib", "1.0.0", "1.0.0.0", "https://e.com/a.zip")];
        let operations = plan(&packages, &InstalledRepository::default(), &["acme/app"]);
        assert_eq!(operations.len(), 1);
        assert!(matches!(operations[0], Operation::Install { .. }));
    }

    #[test]
    fn test_plan_keeps_records_of_unscanned_parents() {
        let installed = InstalledRepository::from_json(
            r#"[{ "name": "acme/foo--bar", "version": "1.0.0", "type": "library" }]"#,
            "/vendor/composer",
        )
        .unwrap();

        assert!(plan(&[], &installed, &["acme/app"]).is_empty());
        assert_eq!(
            plan(&[], &installed, &["acme/app", "acme/foo"]),
            vec![Operation::Uninstall {
                name: "acme/foo--bar".into(),
                version: "1.0.0".into(),
            }]
        );
    }

    #[test]
    fn test_operation_serializes_with_tag() {
        let op = Operation::Uninstall {
            name: "acme/app--old".into(),
            version: "0.1.0".into(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            serde_json::json!({ "operation": "uninstall", "name": "acme/app--old", "version": "0.1.0" })
        );
    }
}

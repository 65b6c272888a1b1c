//! Schema migration framework.

use std::collections::HashSet;

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files predate site ids; sites were addressed by name.
///
/// A derived id that is already taken gets the site's position appended.
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    let mut taken: HashSet<String> = project
        .sites
        .iter()
        .filter(|s| !s.id.trim().is_empty())
        .map(|s| s.id.clone())
        .collect();

    for (idx, site) in project.sites.iter_mut().enumerate() {
        if !site.id.trim().is_empty() {
            continue;
        }
        let base = slug(&site.name).unwrap_or_else(|| format!("site-{}", idx + 1));
        let mut id = base.clone();
        let mut n = idx + 1;
        while taken.contains(&id) {
            id = format!("{}-{}", base, n);
            n += 1;
        }
        taken.insert(id.clone());
        site.id = id;
    }
    project.version = 1;
    Ok(project)
}

fn slug(name: &str) -> Option<String> {
    let mut out = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let out = out.trim_matches('-').to_string();
    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SiteDef;

    #[test]
    fn v0_sites_get_ids_from_names() {
        let project = Project {
            version: 0,
            name: "Legacy".to_string(),
            sites: vec![
                SiteDef {
                    name: "North Block  (A)".to_string(),
                    ..SiteDef::default()
                },
                SiteDef::default(),
            ],
        };
        let migrated = migrate_to_latest(project).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.sites[0].id, "north-block-a");
        assert_eq!(migrated.sites[1].id, "site-2");
    }

    #[test]
    fn colliding_names_get_distinct_ids() {
        let named = |name: &str| SiteDef {
            name: name.to_string(),
            ..SiteDef::default()
        };
        let project = Project {
            version: 0,
            name: "Legacy".to_string(),
            sites: vec![
                named("Site A"),
                named("site-a"),
                SiteDef {
                    id: "site-a-3".to_string(),
                    ..named("Third")
                },
                named("SITE  A"),
            ],
        };
        let migrated = migrate_to_latest(project).unwrap();
        let ids: Vec<_> = migrated.sites.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["site-a", "site-a-2", "site-a-3", "site-a-4"]);
        crate::validate_project(&migrated).unwrap();
    }

    #[test]
    fn current_version_is_untouched() {
        let project = Project {
            version: 1,
            name: "Current".to_string(),
            sites: vec![SiteDef {
                id: "".to_string(),
                ..SiteDef::default()
            }],
        };
        let migrated = migrate_to_latest(project.clone()).unwrap();
        assert_eq!(migrated, project);
    }
}

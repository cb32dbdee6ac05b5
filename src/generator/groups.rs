use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::ApiDocsConfig;
use crate::error::BuildError;
use crate::model::{Group, Subgroup};
use crate::normalize::EndpointNormalizer;
use crate::ordering::{sort_endpoints, sort_subgroups};
use crate::slug::slugify;
use crate::source::{EndpointData, EndpointSource, GroupFile};

/// Adopt `incoming` into `existing` under the description merge rule.
///
/// An empty existing description takes the incoming one; an empty incoming
/// description changes nothing. Two different non-empty descriptions are a
/// conflict, reported as `false` with `existing` left untouched.
#[must_use]
pub fn merge_description(existing: &mut String, incoming: &str) -> bool {
    if incoming.is_empty() || existing == incoming {
        return true;
    }
    if existing.is_empty() {
        *existing = incoming.to_string();
        return true;
    }
    false
}

/// A group under construction: subgroups keyed by name, kept in creation
/// order until the final sort.
#[derive(Debug)]
struct GroupEntry {
    name: String,
    description: String,
    subgroups: Vec<Subgroup>,
    subgroup_index: HashMap<String, usize>,
}

impl GroupEntry {
    fn new(name: &str, description: String) -> Self {
        Self {
            name: name.to_string(),
            description,
            subgroups: Vec::new(),
            subgroup_index: HashMap::new(),
        }
    }

    fn subgroup_mut(&mut self, name: &str, description: &str) -> Result<&mut Subgroup, BuildError> {
        let index = match self.subgroup_index.get(name) {
            Some(&index) => {
                let existing = &mut self.subgroups[index].description;
                if !merge_description(existing, description) {
                    return Err(BuildError::ConflictingSubgroupDescription {
                        group: self.name.clone(),
                        subgroup: name.to_string(),
                        existing: existing.clone(),
                        new: description.to_string(),
                    });
                }
                index
            }
            None => {
                self.subgroups.push(Subgroup {
                    name: name.to_string(),
                    slug: slugify(name),
                    description: description.to_string(),
                    endpoints: Vec::new(),
                });
                let index = self.subgroups.len() - 1;
                self.subgroup_index.insert(name.to_string(), index);
                index
            }
        };
        Ok(&mut self.subgroups[index])
    }

    fn finish(self, subgroup_order: &[String]) -> Group {
        let subgroups = self
            .subgroups
            .into_iter()
            .map(|mut subgroup| {
                subgroup.endpoints = sort_endpoints(subgroup.endpoints);
                subgroup
            })
            .collect();
        Group {
            slug: slugify(&self.name),
            name: self.name,
            description: self.description,
            subgroups: sort_subgroups(subgroups, subgroup_order),
        }
    }
}

/// Accumulates groups across input files.
#[derive(Debug, Default)]
struct GroupBuilder {
    groups: Vec<GroupEntry>,
    index: HashMap<String, usize>,
}

impl GroupBuilder {
    fn group_mut(&mut self, name: &str, description: String) -> Result<&mut GroupEntry, BuildError> {
        let index = match self.index.get(name) {
            Some(&index) => {
                let existing = &mut self.groups[index].description;
                if !merge_description(existing, &description) {
                    return Err(BuildError::ConflictingGroupDescription {
                        group: name.to_string(),
                        existing: existing.clone(),
                        new: description,
                    });
                }
                index
            }
            None => {
                self.groups.push(GroupEntry::new(name, description));
                let index = self.groups.len() - 1;
                self.index.insert(name.to_string(), index);
                index
            }
        };
        Ok(&mut self.groups[index])
    }
}

/// Merge every input file into groups and subgroups, normalizing each
/// endpoint on the way.
///
/// Files are visited in file-key order. Files without an `endpoints` list or a
/// `name` are skipped, as are endpoint records that are not mappings. Each
/// subgroup's endpoints and each group's subgroups come back sorted; the
/// groups themselves stay in first-seen order.
///
/// # Errors
///
/// Fails on the first group or subgroup that receives two different non-empty
/// descriptions.
pub fn build_groups(
    data: &EndpointData,
    api_docs: &ApiDocsConfig,
    normalizer: &mut EndpointNormalizer,
) -> Result<Vec<Group>, BuildError> {
    let mut builder = GroupBuilder::default();

    let mut files: Vec<(&String, _)> = data.iter().collect();
    files.sort_by(|a, b| a.0.cmp(b.0));

    for (key, value) in files {
        let Some(file) = GroupFile::from_value(value) else {
            debug!(file = %key, "Skipping input without name or endpoints");
            continue;
        };
        let group = builder.group_mut(file.name, file.description_text())?;

        for raw in file.endpoints {
            let Some(source) = EndpointSource::from_value(raw) else {
                debug!(file = %key, "Skipping endpoint record that is not a mapping");
                continue;
            };
            let metadata = source.metadata();
            group
                .subgroup_mut(&metadata.subgroup, &metadata.subgroup_description)?
                .endpoints
                .push(normalizer.normalize(&source, file.name));
        }
    }

    let groups: Vec<Group> = builder
        .groups
        .into_iter()
        .map(|entry| {
            let order = api_docs.subgroup_order(&entry.name);
            entry.finish(order)
        })
        .collect();

    info!(
        groups = groups.len(),
        endpoints = groups.iter().map(Group::endpoint_count).sum::<usize>(),
        "Built API groups"
    );
    Ok(groups)
}

use super::WorkflowPhase;
use crate::pipeline::{PipelineError, RunContext, Stage};
use crate::progress::ProgressEvent;
use ignore::WalkBuilder;
use roxmltree::Document;
use serde::Serialize;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub files_removed: usize,
    pub references_removed: usize,
}

/// Removes the template's placeholder sample from a freshly created project.
///
/// Deletes every file whose name contains `placeholder`, then drops each
/// `ItemGroup` child of `<project_root>/<descriptor_name>` whose `Include`
/// attribute mentions it. A missing descriptor leaves nothing to patch.
pub fn clean_template(
    project_root: &Path,
    descriptor_name: &str,
    placeholder: &str,
) -> Result<CleanSummary, PipelineError> {
    let mut summary = CleanSummary::default();
    if placeholder.is_empty() {
        return Ok(summary);
    }

    let mut doomed: Vec<PathBuf> = Vec::new();
    for result in WalkBuilder::new(project_root).standard_filters(false).build() {
        let entry = result.map_err(|err| {
            PipelineError::io(project_root, io::Error::new(io::ErrorKind::Other, err.to_string()))
        })?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && entry.file_name().to_string_lossy().contains(placeholder) {
            doomed.push(entry.into_path());
        }
    }

    for path in doomed {
        fs::remove_file(&path).map_err(|e| PipelineError::io(&path, e))?;
        debug!(path = %path.display(), "Removed placeholder file");
        summary.files_removed += 1;
    }

    let descriptor = project_root.join(descriptor_name);
    if descriptor.is_file() {
        let text = fs::read_to_string(&descriptor).map_err(|e| PipelineError::io(&descriptor, e))?;
        let (patched, removed) =
            strip_placeholder_items(&text, placeholder).map_err(|e| {
                PipelineError::DescriptorParse {
                    path: descriptor.clone(),
                    message: e.to_string(),
                }
            })?;
        if removed > 0 {
            fs::write(&descriptor, patched).map_err(|e| PipelineError::io(&descriptor, e))?;
        }
        summary.references_removed = removed;
    } else {
        debug!(descriptor = %descriptor.display(), "Descriptor not found, nothing to patch");
    }

    info!(
        placeholder,
        files_removed = summary.files_removed,
        references_removed = summary.references_removed,
        "Template cleaned"
    );
    Ok(summary)
}

/// Cuts placeholder items out of descriptor XML, leaving every other byte untouched.
///
/// Returns the patched text and the number of elements removed.
pub fn strip_placeholder_items(
    text: &str,
    placeholder: &str,
) -> Result<(String, usize), roxmltree::Error> {
    let doc = Document::parse(text)?;

    let mut ranges: Vec<Range<usize>> = doc
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("ItemGroup"))
        .flat_map(|group| group.children())
        .filter(|node| node.is_element())
        .filter(|node| {
            node.attribute("Include")
                .is_some_and(|include| include.contains(placeholder))
        })
        .map(|node| widen_to_line(text, node.range()))
        .collect();

    let removed = ranges.len();
    ranges.sort_by_key(|r| std::cmp::Reverse(r.start));

    let mut patched = text.to_string();
    for range in ranges {
        patched.replace_range(range, "");
    }
    Ok((patched, removed))
}

/// Extends an element's range over its whole line when nothing else shares that line.
fn widen_to_line(text: &str, range: Range<usize>) -> Range<usize> {
    let line_start = text[..range.start].rfind('\n').map_or(0, |i| i + 1);
    if !text[line_start..range.start].trim().is_empty() {
        return range;
    }

    let line_end = text[range.end..]
        .find('\n')
        .map_or(text.len(), |i| range.end + i + 1);
    if !text[range.end..line_end].trim().is_empty() {
        return range;
    }

    line_start..line_end
}

pub struct CleanPhase;

impl WorkflowPhase for CleanPhase {
    fn stage(&self) -> Stage {
        Stage::Clean
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let placeholder = context.config.placeholder.as_str();
        let descriptor_name = context.config.descriptor_name(&context.request.project_name);

        let summary = clean_template(&context.project_root, &descriptor_name, placeholder)?;
        context.emit(ProgressEvent::TemplateCleaned {
            placeholder: placeholder.to_string(),
            files_removed: summary.files_removed,
            references_removed: summary.references_removed,
        });
        Ok(())
    }
}

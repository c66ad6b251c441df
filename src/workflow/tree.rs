// Copyright (c) The StackClass Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loading a working-tree subdirectory into an in-memory `relative_path ->
//! bytes` map, and the pure student-template filtering rules that operate on
//! that map. Kept filesystem-free below the loader so the filtering rules
//! are unit-testable without a checkout.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub type FileTree = BTreeMap<String, Vec<u8>>;

/// Recursively reads `root` into a `FileTree` keyed by path relative to
/// `root`, using forward slashes regardless of platform.
pub fn load_tree(root: &Path) -> std::io::Result<FileTree> {
    let mut tree = FileTree::new();
    if !root.exists() {
        return Ok(tree);
    }
    walk(root, root, &mut tree)?;
    Ok(tree)
}

fn walk(root: &Path, dir: &Path, out: &mut FileTree) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|n| n.to_str()) == Some(".git") {
                continue;
            }
            walk(root, &path, out)?;
        } else {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let key = relative.to_string_lossy().replace('\\', "/");
            out.insert(key, std::fs::read(&path)?);
        }
    }
    Ok(())
}

pub fn write_tree(root: &Path, entries: &[(String, Vec<u8>)]) -> std::io::Result<()> {
    for (relative, bytes) in entries {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
    }
    Ok(())
}

fn basename(path: &str) -> &str {
    Path::new(path).file_name().and_then(|n| n.to_str()).unwrap_or(path)
}

/// Renders `content/index.md` -> `README.md` and `content/index_<lang>.md`
/// -> `README_<lang>.md`; other `content/**` files keep their layout.
fn render_content_path(relative: &str) -> Option<String> {
    let rest = relative.strip_prefix("content/")?;
    if rest == "index.md" {
        return Some("README.md".to_string());
    }
    if let Some(lang) = rest.strip_prefix("index_").and_then(|s| s.strip_suffix(".md")) {
        return Some(format!("README_{lang}.md"));
    }
    Some(rest.to_string())
}

/// Applies the student-visibility filter described for the student-template
/// release path, given the example's loaded tree, its parsed `meta.yaml` (if
/// any), and the raw `meta.yaml` source.
pub fn filter_for_students(tree: &FileTree, meta: Option<&crate::schema::ExampleMeta>) -> Vec<(String, Vec<u8>)> {
    let Some(meta) = meta else {
        return tree
            .iter()
            .filter(|(path, _)| {
                let name = basename(path);
                path != "meta.yaml" && !name.starts_with("test") && !is_test_suffixed(name)
            })
            .map(|(p, b)| (p.clone(), b.clone()))
            .collect();
    };

    let mut out = Vec::new();

    for (path, bytes) in tree {
        if let Some(rendered) = render_content_path(path) {
            out.push((rendered, bytes.clone()));
        }
    }

    for additional in &meta.properties.additional_files {
        if let Some(bytes) = find_by_path_or_basename(tree, additional) {
            out.push((basename(additional).to_string(), bytes.clone()));
        }
    }

    for submission_file in &meta.properties.student_submission_files {
        let template = meta
            .properties
            .student_templates
            .iter()
            .filter(|t| basename(t) == basename(submission_file))
            .max_by_key(|t| t.contains("studentTemplate") as u8)
            .and_then(|t| find_by_path_or_basename(tree, t));
        out.push((submission_file.clone(), template.cloned().unwrap_or_default()));
    }

    out
}

fn is_test_suffixed(name: &str) -> bool {
    matches!(Path::new(name).file_stem().and_then(|s| s.to_str()), Some(stem) if stem.ends_with("_test"))
}

fn find_by_path_or_basename<'a>(tree: &'a FileTree, needle: &str) -> Option<&'a Vec<u8>> {
    tree.get(needle).or_else(|| tree.iter().find(|(p, _)| basename(p) == basename(needle)).map(|(_, b)| b))
}

/// Builds the `title-path / title` breadcrumb from ltree path segments,
/// falling back to the raw segment when no title is known for it.
pub fn title_path(segments: &[String], titles: &BTreeMap<String, String>) -> String {
    let mut acc = PathBuf::new();
    let mut rendered = Vec::with_capacity(segments.len());
    for segment in segments {
        acc.push(segment);
        let key = acc.to_string_lossy().replace('\\', "/").replace('/', ".");
        rendered.push(titles.get(&key).cloned().unwrap_or_else(|| segment.clone()));
    }
    rendered.join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExampleMeta;

    fn tree_with(entries: &[(&str, &str)]) -> FileTree {
        entries.iter().map(|(p, c)| (p.to_string(), c.as_bytes().to_vec())).collect()
    }

    #[test]
    fn without_meta_skips_tests_and_meta_yaml() {
        let tree = tree_with(&[("main.py", "x"), ("test_main.py", "y"), ("helper_test.py", "z"), ("meta.yaml", "k")]);
        let filtered = filter_for_students(&tree, None);
        let paths: Vec<_> = filtered.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["main.py"]);
    }

    #[test]
    fn renames_content_index_to_readme() {
        let tree = tree_with(&[("content/index.md", "intro"), ("content/index_de.md", "einleitung"), ("content/img/a.png", "bin")]);
        let meta = ExampleMeta::default();
        let filtered = filter_for_students(&tree, Some(&meta));
        let map: BTreeMap<_, _> = filtered.into_iter().collect();
        assert_eq!(map.get("README.md").map(|b| b.as_slice()), Some("intro".as_bytes()));
        assert_eq!(map.get("README_de.md").map(|b| b.as_slice()), Some("einleitung".as_bytes()));
        assert!(map.contains_key("img/a.png"));
    }

    #[test]
    fn seeds_submission_files_from_matching_template_or_empty() {
        let tree = tree_with(&[("studentTemplate/main.py", "seed"), ("other.py", "ignored")]);
        let mut meta = ExampleMeta::default();
        meta.properties.student_templates = vec!["studentTemplate/main.py".to_string()];
        meta.properties.student_submission_files = vec!["main.py".to_string(), "blank.py".to_string()];
        let filtered = filter_for_students(&tree, Some(&meta));
        let map: BTreeMap<_, _> = filtered.into_iter().collect();
        assert_eq!(map.get("main.py").map(|b| b.as_slice()), Some("seed".as_bytes()));
        assert_eq!(map.get("blank.py").map(|b| b.as_slice()), Some([].as_slice()));
    }

    #[test]
    fn title_path_falls_back_to_raw_segment() {
        let titles = BTreeMap::from([("week1".to_string(), "Week 1".to_string())]);
        let segments = vec!["week1".to_string(), "loops".to_string()];
        assert_eq!(title_path(&segments, &titles), "Week 1 / loops");
    }
}

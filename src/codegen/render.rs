//! C# source rendering for one category.
//!
//! The artifact contains the enum itself followed by a static
//! `<ClassName>Manager` class that maps members to their name strings and
//! back:
//!
//! ```text
//! public enum TagName
//! {
//!     Player,
//!     Enemy,
//! }
//! public static class TagNameManager
//! {
//!     public static Dictionary<TagName, string> tagnames = ...;
//!     public static string GetString(this TagName tagname) { ... }
//!     public static TagName GetTagName(string name) { ... }
//! }
//! ```

use std::fmt::Write;

use crate::error::AppError;
use crate::models::GeneratedArtifact;

/// First line of every generated file.
pub const GENERATED_MARKER: &str = "// <auto-generated> Created by enumgen. Manual edits are overwritten.";

const IMPORTS: &[&str] = &["using System.Collections.Generic;", "using System.Linq;"];

const INDENT: &str = "    ";

/// Render the artifact for `class_name` with members `names`.
///
/// `names` must already be sanitized and de-duplicated. An empty list is
/// rejected with [`AppError::NoContent`] instead of producing an empty enum.
pub fn render(class_name: &str, names: &[String]) -> Result<GeneratedArtifact, AppError> {
    if names.is_empty() {
        return Err(AppError::NoContent {
            class_name: class_name.to_string(),
        });
    }

    let mut out = String::new();
    write_artifact(&mut out, class_name, names).expect("writing to a String cannot fail");

    Ok(GeneratedArtifact::new(
        class_name.to_string(),
        names.to_vec(),
        out,
    ))
}

fn write_artifact(out: &mut String, class_name: &str, names: &[String]) -> std::fmt::Result {
    let value = class_name.to_lowercase();
    let table = format!("{value}s");

    writeln!(out, "{GENERATED_MARKER}")?;
    for import in IMPORTS {
        writeln!(out, "{import}")?;
    }
    writeln!(out)?;

    writeln!(out, "public enum {class_name}")?;
    writeln!(out, "{{")?;
    for name in names {
        writeln!(out, "{INDENT}{name},")?;
    }
    writeln!(out, "}}")?;

    writeln!(out, "public static class {class_name}Manager")?;
    writeln!(out, "{{")?;
    writeln!(
        out,
        "{INDENT}public static Dictionary<{class_name}, string> {table} = new Dictionary<{class_name}, string>"
    )?;
    writeln!(out, "{INDENT}{{")?;
    for name in names {
        writeln!(out, "{INDENT}{INDENT}{{{class_name}.{name}, \"{name}\"}},")?;
    }
    writeln!(out, "{INDENT}}};")?;

    writeln!(out, "{INDENT}/// <summary>")?;
    writeln!(out, "{INDENT}/// Returns the name string paired with the value.")?;
    writeln!(out, "{INDENT}/// </summary>")?;
    writeln!(
        out,
        "{INDENT}public static string GetString(this {class_name} {value})"
    )?;
    writeln!(out, "{INDENT}{{")?;
    writeln!(out, "{INDENT}{INDENT}return {table}[{value}];")?;
    writeln!(out, "{INDENT}}}")?;

    writeln!(out, "{INDENT}/// <summary>")?;
    writeln!(
        out,
        "{INDENT}/// Returns the {class_name} paired with the name string, or the default value."
    )?;
    writeln!(out, "{INDENT}/// </summary>")?;
    writeln!(
        out,
        "{INDENT}public static {class_name} Get{class_name}(string name)"
    )?;
    writeln!(out, "{INDENT}{{")?;
    writeln!(
        out,
        "{INDENT}{INDENT}return {table}.FirstOrDefault(pair => pair.Value == name).Key;"
    )?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    /// Extract `(member, string)` pairs from the rendered dictionary literal.
    fn parse_mapping(text: &str, class_name: &str) -> Vec<(String, String)> {
        let prefix = format!("{{{class_name}.");
        text.lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix(&prefix))
            .filter_map(|rest| rest.strip_suffix("\"},"))
            .filter_map(|rest| rest.split_once(", \""))
            .map(|(member, value)| (member.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_render_exact_output() {
        let artifact = render("TagName", &names(&["Player", "Enemy"])).unwrap();
        let expected = format!(
            "{GENERATED_MARKER}
using System.Collections.Generic;
using System.Linq;

public enum TagName
{{
    Player,
    Enemy,
}}
public static class TagNameManager
{{
    public static Dictionary<TagName, string> tagnames = new Dictionary<TagName, string>
    {{
        {{TagName.Player, \"Player\"}},
        {{TagName.Enemy, \"Enemy\"}},
    }};
    /// <summary>
    /// Returns the name string paired with the value.
    /// </summary>
    public static string GetString(this TagName tagname)
    {{
        return tagnames[tagname];
    }}
    /// <summary>
    /// Returns the TagName paired with the name string, or the default value.
    /// </summary>
    public static TagName GetTagName(string name)
    {{
        return tagnames.FirstOrDefault(pair => pair.Value == name).Key;
    }}
}}
"
        );
        assert_eq!(artifact.text(), expected);
        assert_eq!(artifact.class_name(), "TagName");
        assert_eq!(artifact.members(), &["Player", "Enemy"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = names(&["Default", "UI", "Water"]);
        let first = render("LayerName", &input).unwrap();
        let second = render("LayerName", &input).unwrap();
        assert_eq!(first.text().as_bytes(), second.text().as_bytes());
    }

    #[test]
    fn test_render_empty_is_no_content() {
        let err = render("ButtonName", &[]).unwrap_err();
        assert!(matches!(err, AppError::NoContent { ref class_name } if class_name == "ButtonName"));
    }

    #[test]
    fn test_mapping_round_trip() {
        let input = names(&["Default", "Background", "Foreground", "UI"]);
        let artifact = render("SortingLayerName", &input).unwrap();
        let mapping = parse_mapping(artifact.text(), "SortingLayerName");

        assert_eq!(mapping.len(), input.len());
        for (member, name) in &mapping {
            // Enum -> string yields the sanitized name.
            assert_eq!(member, name);
            // String -> enum yields the first member paired with it.
            let reverse = mapping
                .iter()
                .find(|(_, value)| value == name)
                .map(|(m, _)| m);
            assert_eq!(reverse, Some(member));
        }
        let members: Vec<String> = mapping.into_iter().map(|(m, _)| m).collect();
        assert_eq!(members, input);
    }

    #[test]
    fn test_lookup_names_follow_class_name() {
        let artifact = render("Axis", &names(&["Horizontal"])).unwrap();
        let text = artifact.text();
        assert!(text.contains("public static class AxisManager"));
        assert!(text.contains("Dictionary<Axis, string> axiss"));
        assert!(text.contains("public static Axis GetAxis(string name)"));
    }
}

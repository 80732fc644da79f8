//! Format sniffing for inbound template text.
//!
//! Detection is structural: the first YAML document whose root is a mapping is inspected
//! for the keys that distinguish the three schemas. The classifier never fails; anything
//! it cannot place is [`YamlType::Unknown`].

/// The detected format of a template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YamlType {
    CompositeTemplate,
    DockerCompose,
    Kubernetes,
    Unknown,
}

const YAML_CONTENT_TYPES: [&str; 4] = [
    "application/yaml",
    "application/x-yaml",
    "text/yaml",
    "text/x-yaml",
];

/// True for the YAML media types. Parameters (`; charset=...`) are ignored.
pub fn is_yaml_content_type(content_type: &str) -> bool {
    let media_type = media_type(content_type);
    YAML_CONTENT_TYPES
        .iter()
        .any(|yaml| media_type.eq_ignore_ascii_case(yaml))
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

/// Classifies `text`. A declared content type other than YAML or JSON means the body is
/// not a template at all.
pub fn classify(text: &str, content_type: Option<&str>) -> YamlType {
    if let Some(content_type) = content_type {
        let declared = media_type(content_type);
        if !declared.is_empty()
            && !is_yaml_content_type(declared)
            && !declared.eq_ignore_ascii_case("application/json")
        {
            return YamlType::Unknown;
        }
    }

    match first_mapping(text) {
        Some(root) => classify_root(&root),
        None => YamlType::Unknown,
    }
}

fn first_mapping(text: &str) -> Option<serde_yaml::Mapping> {
    for document in split_documents(text) {
        match serde_yaml::from_str::<serde_yaml::Value>(&document) {
            Ok(serde_yaml::Value::Mapping(root)) => return Some(root),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
    None
}

/// Splits YAML text on `---` document markers, keeping each document's text verbatim.
/// Documents holding only blank lines and comments are dropped.
pub fn split_documents(text: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if is_document_marker(line) {
            documents.push(std::mem::take(&mut current));
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    documents.push(current);

    documents.retain(|document| {
        document.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
    });
    documents
}

fn is_document_marker(line: &str) -> bool {
    let line = line.trim_end();
    line == "---" || line.starts_with("--- ")
}

fn classify_root(root: &serde_yaml::Mapping) -> YamlType {
    if root.contains_key("apiVersion") && root.contains_key("kind") {
        return YamlType::Kubernetes;
    }
    if root.contains_key("components") {
        return YamlType::CompositeTemplate;
    }
    if root.contains_key("services") && compose_version_supported(root.get("version")) {
        return YamlType::DockerCompose;
    }
    YamlType::Unknown
}

fn compose_version_supported(version: Option<&serde_yaml::Value>) -> bool {
    let version = match version {
        None | Some(serde_yaml::Value::Null) => return true,
        Some(serde_yaml::Value::String(s)) => s.trim().to_string(),
        Some(serde_yaml::Value::Number(n)) => n.to_string(),
        Some(_) => return false,
    };
    version.starts_with('2') || version.starts_with('3')
}

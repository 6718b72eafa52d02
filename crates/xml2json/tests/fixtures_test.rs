use std::fs;
use std::path::{Path, PathBuf};

use xml2json::{convert, Direction};

fn fixtures(dir: &str) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(dir);
    let mut paths = Vec::new();
    for entry in fs::read_dir(root)? {
        paths.push(entry?.path());
    }
    paths.sort();
    Ok(paths)
}

fn direction(path: &Path) -> Result<Direction, Box<dyn std::error::Error>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("xml") => Ok(Direction::XmlToJson),
        Some("json") => Ok(Direction::JsonToXml),
        _ => Err(std::io::Error::other(format!("unexpected fixture: {path:?}")).into()),
    }
}

fn reverse(direction: Direction) -> Direction {
    match direction {
        Direction::XmlToJson => Direction::JsonToXml,
        Direction::JsonToXml => Direction::XmlToJson,
    }
}

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let paths = fixtures("valid")?;
    assert!(!paths.is_empty());

    for path in paths {
        let content = fs::read_to_string(&path)?;
        let direction = direction(&path)?;

        let first = convert(&content, direction).map_err(|err| {
            std::io::Error::other(format!("failed to convert valid file {path:?}: {err}"))
        })?;

        // A second trip through the other direction must reproduce the output
        let back = convert(&first, reverse(direction))?;
        let second = convert(&back, direction)?;
        assert_eq!(first, second, "unstable round trip for {path:?}");
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let paths = fixtures("invalid")?;
    assert!(!paths.is_empty());

    for path in paths {
        let content = fs::read_to_string(&path)?;
        let result = convert(&content, direction(&path)?);
        if result.is_ok() {
            return Err(std::io::Error::other(format!(
                "Should fail to convert invalid file: {path:?}"
            ))
            .into());
        }
    }
    Ok(())
}

#[test]
fn test_catalog_fixture_shape() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/valid/catalog.xml");
    let value = xml2json::xml_to_json(&fs::read_to_string(path)?)?;

    let catalog = value
        .as_object()
        .and_then(|root| root.get("catalog"))
        .and_then(|catalog| catalog.as_object())
        .ok_or("catalog should be an object")?;

    assert_eq!(
        catalog.get("@updated").and_then(|v| v.as_string()),
        Some("2024-01-15")
    );
    assert_eq!(catalog.get("note"), Some(&xml2json::Value::Null));

    let books = catalog
        .get("book")
        .and_then(|books| books.as_array())
        .ok_or("two books should encode as an array")?;
    assert_eq!(books.len(), 2);

    // One tag under the second book stays a plain string
    let second_tags = books
        .get(1)
        .and_then(|book| book.as_object())
        .and_then(|book| book.get("tags"))
        .and_then(|tags| tags.as_object())
        .and_then(|tags| tags.get("tag"));
    assert_eq!(second_tags.and_then(|tag| tag.as_string()), Some("fantasy"));
    Ok(())
}

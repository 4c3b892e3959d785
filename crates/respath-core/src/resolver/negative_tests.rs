use super::*;
use crate::error::PathError;
use crate::hierarchy::memory::InMemoryHierarchy;

fn create_test_workspace() -> InMemoryHierarchy {
    let mut hierarchy = InMemoryHierarchy::new();
    hierarchy.create_project("myProject").unwrap();
    hierarchy
}

#[test]
fn test_absent_identifier() {
    let ws = create_test_workspace();
    let resolver = ResourceResolver::new(&ws);

    assert_eq!(resolver.resolve_opt(None), Err(ResolveError::NullIdentifier));
}

#[test]
fn test_present_identifier_through_resolve_opt() {
    let ws = create_test_workspace();
    let resolver = ResourceResolver::new(&ws);
    let identifier = ResourceIdentifier::platform_resource("/myProject");

    assert_eq!(
        resolver.resolve_opt(Some(&identifier)),
        resolver.resolve(&identifier)
    );
}

#[test]
fn test_plugin_identifier_is_not_applicable() {
    let ws = create_test_workspace();
    let identifier = ResourceIdentifier::platform_plugin(
        "/org.example.test/org/example/uriutils/TestToResourceNegative.class",
    );

    assert_eq!(ResourceResolver::new(&ws).resolve(&identifier), Ok(None));
}

#[test]
fn test_other_identifiers_are_not_applicable() {
    let ws = create_test_workspace();
    let resolver = ResourceResolver::new(&ws);

    for text in ["https://example.com/MyFile.ext", "fasfasdf", "file:///myProject/x"] {
        let identifier = ResourceIdentifier::parse(text).unwrap();
        assert_eq!(resolver.resolve(&identifier), Ok(None), "{text}");
    }
}

#[test]
fn test_not_applicable_regardless_of_path_content() {
    let ws = create_test_workspace();
    let resolver = ResourceResolver::new(&ws);

    // Would be malformed as a platform resource.
    let identifier = ResourceIdentifier::platform_plugin("/...////");
    assert_eq!(resolver.resolve(&identifier), Ok(None));
}

#[test]
fn test_malformed_platform_resource() {
    let ws = create_test_workspace();
    let identifier = ResourceIdentifier::parse("platform:/resource/...////").unwrap();

    let err = ResourceResolver::new(&ws).resolve(&identifier).unwrap_err();
    assert_eq!(
        err,
        ResolveError::MalformedIdentifier {
            identifier: "platform:/resource/...////".to_string(),
            source: PathError::ReservedSegment("...".to_string()),
        }
    );
}

#[test]
fn test_relative_segments_are_rejected_not_resolved() {
    let ws = create_test_workspace();
    let resolver = ResourceResolver::new(&ws);

    for payload in ["/myProject/../myProject", "/myProject/./x", "/..", "."] {
        let identifier = ResourceIdentifier::platform_resource(payload);
        assert!(
            matches!(
                resolver.resolve(&identifier),
                Err(ResolveError::MalformedIdentifier { .. })
            ),
            "payload {payload}"
        );
    }
}

#[test]
fn test_dot_segments_in_uri_text_are_rejected() {
    let ws = create_test_workspace();
    let resolver = ResourceResolver::new(&ws);

    for text in [
        "platform:/resource/myProject/../other",
        "platform:/resource/myProject/%2e%2e/other",
        "platform:/resource/myProject/./x",
        "platform:/resource/../x/y",
        "platform:/resource/..",
    ] {
        let identifier = ResourceIdentifier::parse(text).unwrap();
        assert!(
            matches!(
                resolver.resolve(&identifier),
                Err(ResolveError::MalformedIdentifier {
                    source: PathError::ReservedSegment(_),
                    ..
                })
            ),
            "{text}"
        );
    }
}

#[test]
fn test_nul_segment_is_rejected() {
    let ws = create_test_workspace();
    let identifier = ResourceIdentifier::platform_resource("/myProject/a\0b");

    assert!(matches!(
        ResourceResolver::new(&ws).resolve(&identifier),
        Err(ResolveError::MalformedIdentifier {
            source: PathError::NulCharacter,
            ..
        })
    ));
}

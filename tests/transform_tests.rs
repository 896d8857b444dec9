//! End-to-end checks of the signature transformer through the public API.

use asyncify::core::{Declaration, FunctionSignature, Parameter, TransformError};
use asyncify::generators::Generator;
use asyncify::host::parse_declaration;
use asyncify::transform::{transform, BridgeVariant, CompletionShape, TransformOptions};
use indoc::indoc;
use pretty_assertions::assert_eq;

/// Parse a member function header, giving it an empty body.
fn parse(header: &str) -> Declaration {
    parse_declaration(&format!("{header} {{}}"), true).unwrap()
}

fn expand(generator: Generator, header: &str) -> Result<String, TransformError> {
    generator
        .expand(&parse(header), &TransformOptions::default())
        .map(|g| g.render(4))
}

#[test]
fn test_plain_value_completion_every_plain_generator() {
    let header = "func fetch(id: Int, completion: @escaping (Int) -> Void)";
    for (generator, primitive) in [
        (Generator::AsyncifyChecked, "withCheckedContinuation"),
        (Generator::AsyncifyUnchecked, "withUnsafeContinuation"),
        (Generator::Asyncify, "withCheckedContinuation"),
    ] {
        let generated = generator
            .expand(&parse(header), &TransformOptions::default())
            .unwrap();
        assert_eq!(generated.return_type(), Some("Int"));
        assert!(!generated.throws);
        let text = generated.render(4);
        assert_eq!(text.matches(primitive).count(), 1, "{generator}");
        assert!(!text.contains("try"));
    }
}

#[test]
fn test_result_completion_branches_on_success_and_failure() {
    let text = expand(
        Generator::AsyncifyUncheckedThrowing,
        "func fetch(id: Int, completion: @escaping (Result<Int, Error>) -> Void)",
    )
    .unwrap();
    assert_eq!(
        text,
        indoc! {"
            func fetch(id: Int) async throws -> Int {
                try await withUnsafeThrowingContinuation { continuation in
                    self.fetch(id: id) { result in
                        switch result {
                        case .success(let value):
                            continuation.resume(returning: value)
                        case .failure(let error):
                            continuation.resume(throwing: error)
                        }
                    }
                }
            }"}
    );
}

#[test]
fn test_throwing_generator_on_plain_completion_is_not_throwing() {
    for generator in [
        Generator::AsyncifyCheckedThrowing,
        Generator::AsyncifyUncheckedThrowing,
        Generator::AsyncifyThrowing,
    ] {
        assert_eq!(
            expand(generator, "func f(completion: @escaping (Int) -> Void)"),
            Err(TransformError::NotThrowing)
        );
    }
}

#[test]
fn test_non_function_is_only_function() {
    for source in [
        "var count: Int = 0",
        "struct Box {}",
        "enum Mode { case on }",
        "typealias Id = Int",
    ] {
        assert_eq!(
            transform(
                &parse_declaration(source, true).unwrap(),
                BridgeVariant::Checked,
                &TransformOptions::default()
            ),
            Err(TransformError::OnlyFunction),
            "{source}"
        );
    }
}

#[test]
fn test_wrong_completion_shapes() {
    for header in [
        "func f(count: Int)",
        "func f()",
        "func f(completion: @escaping () -> Void)",
        "func f(completion: @escaping (Int, Error?) -> Void)",
        "func f(completion: @escaping (Int) -> Bool)",
        "func f(completion: ((Int) -> Void)?)",
    ] {
        assert_eq!(
            expand(Generator::AsyncifyChecked, header),
            Err(TransformError::WrongFunctionType),
            "{header}"
        );
    }
}

#[test]
fn test_default_kept_in_declaration_and_omitted_from_call() {
    let text = expand(
        Generator::AsyncifyChecked,
        "func testAdd(a: Int, b: Int = 10, completion: @escaping (Int) -> Void)",
    )
    .unwrap();
    assert!(text.starts_with("func testAdd(a: Int, b: Int = 10) async -> Int {"));
    assert!(text.contains("self.testAdd(a: a, b: b) { object in"));
    assert!(!text.contains("b: 10"));
}

#[test]
fn test_nested_generic_result_payloads() {
    let generated = Generator::AsyncifyCheckedThrowing
        .expand(
            &parse("func f(completion: @escaping (Result<Dictionary<String, [Int]>, MyError>) -> Void)"),
            &TransformOptions::default(),
        )
        .unwrap();
    assert_eq!(
        generated.shape,
        CompletionShape::ResultPair {
            success: "Dictionary<String, [Int]>".into(),
            failure: "MyError".into(),
        }
    );
    assert_eq!(
        generated.header(),
        "func f() async throws -> Dictionary<String, [Int]>"
    );
}

#[test]
fn test_plain_generator_with_result_payload_returns_result() {
    let generated = Generator::AsyncifyChecked
        .expand(
            &parse("func f(completion: @escaping (Result<Int, Error>) -> Void)"),
            &TransformOptions::default(),
        )
        .unwrap();
    assert_eq!(generated.return_type(), Some("Result<Int, Error>"));
    assert!(!generated.throws);
}

#[test]
fn test_labels_and_wildcards() {
    let text = expand(
        Generator::AsyncifyChecked,
        "func send(_ message: String, to recipient: User, completion: @escaping (Bool) -> Void)",
    )
    .unwrap();
    assert!(text.starts_with("func send(_ message: String, to recipient: User) async -> Bool {"));
    assert!(text.contains("self.send(message, to: recipient) { object in"));
}

#[test]
fn test_throwing_original_is_rejected() {
    for generator in Generator::ALL {
        let err = expand(
            generator,
            "func f(completion: @escaping (Result<Int, Error>) -> Void) throws",
        )
        .unwrap_err();
        assert!(
            matches!(&err, TransformError::Custom(msg) if msg.contains("`f` throws")),
            "{generator}: {err:?}"
        );
    }
}

#[test]
fn test_throwing_original_with_error_pair_completion_is_wrong_type() {
    assert_eq!(
        expand(
            Generator::AsyncifyChecked,
            "func f(completion: @escaping (Int, Error?) -> Void) throws",
        ),
        Err(TransformError::WrongFunctionType)
    );
}

#[test]
fn test_free_function_calls_bare_name() {
    let declaration = Declaration::Function(FunctionSignature {
        is_member: false,
        ..FunctionSignature::new(
            "load",
            vec![
                Parameter::new("path", "String"),
                Parameter::new("completion", "@escaping (Data) -> Void"),
            ],
        )
    });
    let text = transform(&declaration, BridgeVariant::Checked, &TransformOptions::default())
        .unwrap()
        .render(4);
    assert!(text.contains("        load(path: path) { object in"));
}

#[test]
fn test_same_input_renders_identically() {
    let header = "public func f<T>(_ x: T, completion: @escaping @Sendable (Result<T, Error>) -> Void) where T: Sendable";
    let first = expand(Generator::AsyncifyCheckedThrowing, header).unwrap();
    let second = expand(Generator::AsyncifyCheckedThrowing, header).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("public func f<T>(_ x: T) async throws -> T where T: Sendable {"));
}

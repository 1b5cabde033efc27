pub mod extend;
pub mod import;
pub mod scan;
pub mod synthesize;
pub mod types;

pub use extend::extend_constructor;
pub use import::{add_import, has_import};
pub use scan::{constructor_parameters, has_constructor, mask_non_code};
pub use synthesize::{constructor_block, synthesize_constructor};
pub use types::{Dependency, InjectMode, Outcome, Skip};

use regex::bytes::Regex;

/// True when the class constructor already takes `<Type> $<name>`.
///
/// Action method arguments, comments and docblocks elsewhere in the file do
/// not count.
pub fn is_already_injected(source: &str, dependency: &Dependency) -> bool {
    let Some(parameters) = constructor_parameters(source) else {
        return false;
    };

    let pattern = format!(
        r"\b{}\s+\${}\b",
        regex::escape(&dependency.type_name),
        regex::escape(&dependency.var_name)
    );
    let masked = mask_non_code(source);
    Regex::new(&pattern)
        .map(|re| re.is_match(&masked[parameters]))
        .unwrap_or(false)
}

/// Inject `dependency` into a controller's source.
///
/// Unlike the raw transformers this is safe to run repeatedly:
///
/// - a file whose constructor already takes the dependency is skipped;
/// - in [`InjectMode::Create`], a class that already has a constructor gets the
///   dependency merged into it instead of a second constructor.
///
/// When a rewrite happens and the dependency carries an import, the matching
/// `use` statement is added as well.
pub fn inject(source: &str, mode: InjectMode, dependency: &Dependency) -> Outcome {
    if is_already_injected(source, dependency) {
        return Outcome::Skipped(Skip::AlreadyInjected);
    }

    let rewritten = match mode {
        InjectMode::Extend => extend_constructor(source, dependency),
        InjectMode::Create if has_constructor(source) => extend_constructor(source, dependency),
        InjectMode::Create => synthesize_constructor(source, dependency),
    };

    match rewritten {
        Some(content) => {
            let content = add_import(&content, dependency).unwrap_or(content);
            Outcome::Injected(content)
        }
        None => Outcome::Skipped(Skip::PatternNotMatched),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENDABLE: &str = "\
<?php

namespace App\\Controller;

use App\\Entity\\Badge;

class BadgeController extends AbstractController
{
    public function __construct(
        private readonly BadgeRepository $badgeRepository,
    ) {
    }
}
";

    const NO_CONSTRUCTOR: &str = "\
<?php

namespace App\\Controller;

class PlanningController extends AbstractController
{
    public function index(): Response
    {
    }
}
";

    const EXISTING_CONSTRUCTOR: &str = "    public function __construct(
        private readonly BadgeRepository $badgeRepository,
    ) {
    }

";

    const ACTION_ARGUMENT: &str = "\
<?php

namespace App\\Controller;

class BadgeController extends AbstractController
{
CONSTRUCTOR    #[Route('', name: 'badge_index')]
    public function index(CompanyContext $companyContext): Response
    {
        return $this->render('badge/index.html.twig');
    }
}
";

    // ============================================================================
    // is_already_injected tests
    // ============================================================================

    fn constructor_with(parameter: &str) -> String {
        format!(
            "class A extends AbstractController\n{{\n    public function __construct(\n        {parameter},\n    ) {{\n    }}\n}}\n"
        )
    }

    #[test]
    fn test_is_already_injected_detects_parameter() {
        let source = constructor_with("private readonly CompanyContext $companyContext");
        assert!(is_already_injected(&source, &Dependency::default()));
    }

    #[test]
    fn test_is_already_injected_ignores_longer_names() {
        let source = constructor_with("private readonly CompanyContext $companyContextFactory");
        assert!(!is_already_injected(&source, &Dependency::default()));
        let source = constructor_with("private readonly MyCompanyContext $companyContext");
        assert!(!is_already_injected(&source, &Dependency::default()));
    }

    #[test]
    fn test_is_already_injected_ignores_action_arguments() {
        let source = ACTION_ARGUMENT.replace("CONSTRUCTOR", EXISTING_CONSTRUCTOR);
        assert!(!is_already_injected(&source, &Dependency::default()));
    }

    #[test]
    fn test_is_already_injected_ignores_comments() {
        let source = "\
class BadgeController extends AbstractController
{
    /**
     * Needs CompanyContext $companyContext once migrated.
     */
    public function __construct(
        // CompanyContext $companyContext goes here
        private readonly BadgeRepository $badgeRepository,
    ) {
    }
}
";
        assert!(!is_already_injected(source, &Dependency::default()));
        let Outcome::Injected(content) = inject(source, InjectMode::Extend, &Dependency::default())
        else {
            panic!("expected injection");
        };
        assert!(content.contains(
            "$badgeRepository,\n        private readonly CompanyContext $companyContext\n    ) {"
        ));
    }

    #[test]
    fn test_is_already_injected_without_constructor() {
        let source = "class A extends AbstractController\n{\n    public function index(CompanyContext $companyContext) {}\n}\n";
        assert!(!is_already_injected(source, &Dependency::default()));
    }

    // ============================================================================
    // inject tests
    // ============================================================================

    #[test]
    fn test_inject_extend() {
        let outcome = inject(EXTENDABLE, InjectMode::Extend, &Dependency::default());
        match outcome {
            Outcome::Injected(content) => {
                assert!(content.contains(
                    "        private readonly BadgeRepository $badgeRepository,\n        private readonly CompanyContext $companyContext\n    ) {"
                ));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_inject_extend_pattern_not_matched() {
        let outcome = inject(NO_CONSTRUCTOR, InjectMode::Extend, &Dependency::default());
        assert_eq!(outcome, Outcome::Skipped(Skip::PatternNotMatched));
        assert!(!outcome.is_changed());
    }

    #[test]
    fn test_inject_create() {
        let outcome = inject(NO_CONSTRUCTOR, InjectMode::Create, &Dependency::default());
        let Outcome::Injected(content) = outcome else {
            panic!("expected injection");
        };
        assert!(content.contains(
            "class PlanningController extends AbstractController\n{\n    public function __construct(\n        private readonly CompanyContext $companyContext\n    ) {\n    }\n\n    public function index()"
        ));
    }

    #[test]
    fn test_inject_create_merges_into_existing_constructor() {
        let outcome = inject(EXTENDABLE, InjectMode::Create, &Dependency::default());
        let Outcome::Injected(content) = outcome else {
            panic!("expected injection");
        };
        assert_eq!(content.matches("function __construct(").count(), 1);
        assert!(content.contains("private readonly CompanyContext $companyContext\n    ) {"));
    }

    #[test]
    fn test_inject_create_existing_constructor_without_trailing_comma() {
        let source = "class FooController extends AbstractController\n{\n    public function __construct(private Foo $foo)\n    {\n    }\n}\n";
        let outcome = inject(source, InjectMode::Create, &Dependency::default());
        assert_eq!(outcome, Outcome::Skipped(Skip::PatternNotMatched));
    }

    #[test]
    fn test_inject_is_idempotent() {
        let dependency = Dependency::default();
        let Outcome::Injected(once) = inject(EXTENDABLE, InjectMode::Extend, &dependency) else {
            panic!("expected injection");
        };
        assert_eq!(
            inject(&once, InjectMode::Extend, &dependency),
            Outcome::Skipped(Skip::AlreadyInjected)
        );
        assert_eq!(
            inject(&once, InjectMode::Create, &dependency),
            Outcome::Skipped(Skip::AlreadyInjected)
        );
    }

    #[test]
    fn test_inject_already_present_with_trailing_comma() {
        // The raw extender would add a duplicate here.
        let source = constructor_with("private readonly CompanyContext $companyContext");
        assert!(extend_constructor(&source, &Dependency::default()).is_some());
        assert_eq!(
            inject(&source, InjectMode::Extend, &Dependency::default()),
            Outcome::Skipped(Skip::AlreadyInjected)
        );
    }

    #[test]
    fn test_inject_extend_with_action_argument() {
        let source = ACTION_ARGUMENT.replace("CONSTRUCTOR", EXISTING_CONSTRUCTOR);
        let Outcome::Injected(content) = inject(&source, InjectMode::Extend, &Dependency::default())
        else {
            panic!("expected injection");
        };
        assert!(content.contains(
            "        private readonly BadgeRepository $badgeRepository,\n        private readonly CompanyContext $companyContext\n    ) {"
        ));
        assert!(content.contains("public function index(CompanyContext $companyContext): Response"));
    }

    #[test]
    fn test_inject_create_with_action_argument() {
        let source = ACTION_ARGUMENT.replace("CONSTRUCTOR", "");
        let Outcome::Injected(content) = inject(&source, InjectMode::Create, &Dependency::default())
        else {
            panic!("expected injection");
        };
        assert!(content.contains(
            "class BadgeController extends AbstractController\n{\n    public function __construct(\n        private readonly CompanyContext $companyContext\n    ) {\n    }\n\n    #[Route("
        ));
        assert_eq!(
            inject(&content, InjectMode::Create, &Dependency::default()),
            Outcome::Skipped(Skip::AlreadyInjected)
        );
    }

    #[test]
    fn test_inject_create_constructor_only_in_docblock() {
        let source = "class FooController extends AbstractController\n{\n    /** Replaces the old function __construct(Foo $foo) */\n    public function index() {}\n}\n";
        let Outcome::Injected(content) = inject(source, InjectMode::Create, &Dependency::default())
        else {
            panic!("expected injection");
        };
        assert!(content.contains("{\n    public function __construct(\n        private readonly CompanyContext $companyContext\n"));
    }

    #[test]
    fn test_inject_adds_import() {
        let dependency = Dependency::default().with_import("App\\Security\\CompanyContext");
        let Outcome::Injected(content) = inject(NO_CONSTRUCTOR, InjectMode::Create, &dependency)
        else {
            panic!("expected injection");
        };
        assert!(content.contains("namespace App\\Controller;\n\nuse App\\Security\\CompanyContext;\n\nclass"));
    }

    #[test]
    fn test_inject_no_import_when_not_matched() {
        let dependency = Dependency::default().with_import("App\\Security\\CompanyContext");
        assert_eq!(
            inject(NO_CONSTRUCTOR, InjectMode::Extend, &dependency),
            Outcome::Skipped(Skip::PatternNotMatched)
        );
    }
}

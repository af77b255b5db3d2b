use crate::domain::access::AccessLevel;
use crate::domain::declaration::Declaration;
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::EntryPointProvider;

/// Members invoked by a test framework through their annotations.
///
/// Framework runners instantiate the class and call annotated members
/// reflectively; they tolerate package visibility but not less, hence the
/// default Package floor.
pub struct TestFrameworkEntryPoints {
    annotations: Vec<String>,
    floor: Option<AccessLevel>,
}

impl TestFrameworkEntryPoints {
    pub fn new(annotations: Vec<String>, floor: Option<AccessLevel>) -> Self {
        Self { annotations, floor }
    }
}

impl Default for TestFrameworkEntryPoints {
    fn default() -> Self {
        Self::new(
            [
                "Test",
                "ParameterizedTest",
                "RepeatedTest",
                "BeforeEach",
                "AfterEach",
                "BeforeAll",
                "AfterAll",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            Some(AccessLevel::Package),
        )
    }
}

impl EntryPointProvider for TestFrameworkEntryPoints {
    fn is_entry_point(&self, decl: &Declaration, _graph: &DeclarationGraph) -> bool {
        decl.core()
            .annotations
            .iter()
            .any(|a| self.annotations.iter().any(|known| known == a))
    }

    fn min_visibility_floor(&self, _decl: &Declaration) -> Option<AccessLevel> {
        self.floor
    }

    fn name(&self) -> &'static str {
        "test-framework"
    }
}

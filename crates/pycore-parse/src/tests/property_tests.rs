//! Generated inputs: valid programs must rebuild their text exactly, and
//! nothing may panic or escape as an internal error.

use proptest::prelude::*;
use pycore_syntax::walk;

use crate::{Mode, Parsed, parse};

/// Top-level lines, each a complete statement.
const LINES: &[&str] = &[
    "x = 1",
    "a, *b = c  # unpack",
    "y: list[int] = []",
    "z += f(a, *b, k=1, **kw)",
    "import os.path as p",
    "from .. import (a,\n    b)",
    "del a[0], b.c",
    "assert x, 'message'",
    "global g; nonlocal_ = 0",
    "print(*[i ** 2 for i in range(10) if i % 2])",
    "value = {k: v for k, v in pairs}",
    "lam = lambda a, /, b=2, *c, **d: (a, b)",
    "result = x if cond else y",
    "s = 'a' \"b\" r'''c'''",
    "t = a[1:2, ::3]",
    "match = re.match(p, s)",
    "type Alias[T] = dict[str, T]",
    "if a:\n    pass\nelif b:\n    x = 1\nelse:\n    y = 2",
    "while True:\n    break",
    "for i in range(3):\n    continue\nelse:\n    pass",
    "def f(a: int, *, b=None) -> int:\n    return a\n\n",
    "async def g():\n    async with a as b:\n        await b",
    "class C(Base, metaclass=M):\n    '''doc'''\n    def m(self):\n        yield self",
    "try:\n    pass\nexcept* E as e:\n    log(e)\nfinally:\n    pass",
    "@decorator(1)\ndef h():\n    pass",
    "with open(p) as f, lock:\n    data = f.read()",
    "match command:\n    case [x, *rest] if x:\n        pass\n    case {'k': v, **kw}:\n        pass\n    case Point(x=0) | None:\n        pass",
    "# only a comment",
    "",
];

fn line() -> impl Strategy<Value = &'static str> {
    prop::sample::select(LINES)
}

fn program() -> impl Strategy<Value = String> {
    (prop::collection::vec(line(), 0..8), any::<bool>()).prop_map(|(lines, trailing_newline)| {
        let mut text = lines.join("\n");
        if trailing_newline {
            text.push('\n');
        }
        text
    })
}

/// A valid program cut at an arbitrary byte. All fragments are ASCII.
fn truncated_program() -> impl Strategy<Value = String> {
    program().prop_flat_map(|text| {
        let len = text.len();
        (0..=len).prop_map(move |cut| text[..cut].to_owned())
    })
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig { cases: default.cases.max(256), ..default }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn generated_programs_round_trip(text in program()) {
        let parsed = parse(&text, Mode::Module);
        let Ok(Parsed::Module(module)) = parsed else {
            return Err(TestCaseError::fail(format!("{text:?} failed: {parsed:?}")));
        };
        prop_assert_eq!(walk::text(&module), text);
    }

    #[test]
    fn truncated_programs_never_panic(text in truncated_program()) {
        match parse(&text, Mode::Module) {
            Ok(Parsed::Module(module)) => prop_assert_eq!(walk::text(&module), text),
            Ok(Parsed::Expression(_)) => prop_assert!(false, "module mode yields a module"),
            Err(error) => {
                prop_assert!(!error.is_internal(), "{text:?}: {error}");
                prop_assert!(usize::from(error.offset()) <= text.len());
            }
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,200}") {
        for mode in [Mode::Module, Mode::Expression] {
            if let Err(error) = parse(&text, mode) {
                prop_assert!(!error.is_internal(), "{text:?}: {error}");
                prop_assert!(usize::from(error.offset()) <= text.len());
            }
        }
    }
}

use zreflect::{args, Error, Receiver, Reflect, Reflection};

#[derive(Debug, Clone, PartialEq, Reflect)]
struct Config {
    pub step: i64,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
#[zreflect(methods)]
struct Counter {
    pub count: i64,
    pub step: i64,
}

#[zreflect::methods]
impl Counter {
    pub fn new() -> Self {
        Self { count: 0, step: 1 }
    }

    pub fn increment(&mut self) -> i64 {
        self.count += self.step;
        self.count
    }

    #[zreflect(rename = "Configure")]
    pub fn configure(&mut self, config: &Config) {
        self.step = config.step;
    }

    pub fn split(&self) -> (i64, i64, bool) {
        (self.count, self.step, self.count > 0)
    }

    pub fn doubled(&self) -> Self {
        Self {
            count: self.count * 2,
            step: self.step,
        }
    }

    pub fn r#type(&self) -> &'static str {
        "counter"
    }

    #[zreflect(variadic)]
    pub fn sum(&self, base: i64, values: Vec<i64>) -> i64 {
        base + values.iter().sum::<i64>()
    }

    #[zreflect(skip)]
    pub fn reset(&mut self) {
        self.count = 0;
    }

    fn internal(&self) -> i64 {
        self.count
    }
}

trait Describe {
    fn describe(&self) -> String;
    fn scale(&mut self, factor: f64);
}

#[derive(Debug, Clone, Reflect)]
#[zreflect(methods(Describe))]
struct Temperature {
    pub celsius: f64,
}

#[zreflect::methods]
impl Describe for Temperature {
    fn describe(&self) -> String {
        format!("{:.1}°C", self.celsius)
    }

    fn scale(&mut self, factor: f64) {
        self.celsius *= factor;
    }
}

trait Named {
    fn label(&mut self) -> String;
}

#[derive(Debug, Clone, Reflect)]
#[zreflect(methods(Self, Named))]
struct Tag {
    pub text: String,
    pub renames: u32,
}

#[zreflect::methods]
impl Tag {
    pub fn label(&self) -> String {
        self.text.clone()
    }

    pub fn width(&self) -> usize {
        self.text.len()
    }
}

#[zreflect::methods]
impl Named for Tag {
    fn label(&mut self) -> String {
        self.renames += 1;
        format!("{} #{}", self.text, self.renames)
    }
}

#[test_log::test]
fn registered_methods() {
    let mut counter = Counter::new();
    let reflection = Reflection::new(&mut counter).unwrap();

    // Shared methods come first, in declaration order.
    assert_eq!(
        reflection.method_names().collect::<Vec<_>>(),
        [
            "split",
            "doubled",
            "type",
            "sum",
            "internal",
            "increment",
            "Configure"
        ]
    );
    assert!(!reflection.has_method("new"));
    assert!(!reflection.has_method("reset"));
    assert!(!reflection.has_method("configure"));

    let configure = reflection.method("Configure").unwrap();
    assert_eq!(configure.signature(), "fn(&mut self, config: &Config)");
    assert_eq!(configure.receiver(), Receiver::Exclusive);
    assert_eq!(
        reflection.method("split").unwrap().signature(),
        "fn(&self) -> (i64, i64, bool)"
    );
    assert_eq!(
        reflection.method("type").unwrap().signature(),
        "fn(&self) -> &str"
    );
    assert_eq!(
        reflection.method("sum").unwrap().signature(),
        "fn(&self, base: i64, values: ...i64) -> i64"
    );
    assert!(!reflection.method("internal").unwrap().is_exported());
    assert!(reflection.method("doubled").unwrap().is_exported());
    drop(reflection);

    // Skipped methods stay callable directly.
    counter.count = 4;
    counter.reset();
    assert_eq!(counter.count, 0);
}

#[test_log::test]
fn exclusive_calls() {
    let mut counter = Counter::new();
    let mut reflection = Reflection::new(&mut counter).unwrap();

    let returned = reflection.call("increment", args![]).unwrap();
    assert_eq!(returned[0].downcast_ref::<i64>(), Some(&1));

    // Reference parameters take the owned value.
    let returned = reflection
        .call("Configure", args![Config { step: 5 }])
        .unwrap();
    assert!(returned.is_empty());
    reflection.call("increment", args![]).unwrap();
    assert!(matches!(
        reflection.call("Configure", args![5i64]),
        Err(Error::ArgumentType { position: 0, .. })
    ));
    drop(reflection);

    assert_eq!(counter, Counter { count: 6, step: 5 });
}

#[test_log::test]
fn returned_values() {
    let mut counter = Counter { count: 3, step: 2 };
    let mut reflection = Reflection::new(&mut counter).unwrap();

    let returned = reflection.call("split", args![]).unwrap();
    assert_eq!(returned.len(), 3);
    assert_eq!(returned[0].downcast_ref::<i64>(), Some(&3));
    assert_eq!(returned[1].downcast_ref::<i64>(), Some(&2));
    assert_eq!(returned[2].downcast_ref::<bool>(), Some(&true));

    let doubled = reflection.must_call("doubled", args![]).remove(0);
    assert_eq!(
        doubled.downcast::<Counter>().ok(),
        Some(Counter { count: 6, step: 2 })
    );

    // Borrowed returns are handed out owned.
    let returned = reflection.must_call("type", args![]);
    assert_eq!(returned[0].downcast_ref::<String>().unwrap(), "counter");

    let returned = reflection
        .call("sum", args![10i64, vec![1i64, 2, 3]])
        .unwrap();
    assert_eq!(returned[0].downcast_ref::<i64>(), Some(&16));
    assert!(matches!(
        reflection.call("sum", args![10i64, 1i64, 2i64]),
        Err(Error::Arity {
            expected: 2,
            given: 3,
            ..
        })
    ));

    assert!(matches!(
        reflection.call("internal", args![]),
        Err(Error::NotExported(_))
    ));
}

#[test_log::test]
fn bound_methods() {
    let mut counter = Counter::new();
    let mut reflection = Reflection::new(&mut counter).unwrap();

    let mut increment = reflection.method_mut("increment").unwrap();
    assert_eq!(increment.name(), "increment");
    increment.must_call(args![]);
    increment.must_call(args![]);
    drop(reflection);
    assert_eq!(counter.count, 2);

    // Through a shared borrow only `&self` methods are bound.
    let reflection = Reflection::new(&counter).unwrap();
    assert!(reflection.has_method("split"));
    assert!(!reflection.has_method("increment"));
}

#[test_log::test]
fn trait_methods() {
    let mut temperature = Temperature { celsius: 20.0 };
    let mut reflection = Reflection::new(&mut temperature).unwrap();

    let describe = reflection.method("describe").unwrap();
    assert!(describe.is_exported());
    assert_eq!(describe.signature(), "fn(&self) -> String");

    reflection.must_call("scale", args![1.5f64]);
    let returned = reflection.must_call("describe", args![]);
    assert_eq!(returned[0].downcast_ref::<String>().unwrap(), "30.0°C");
    drop(reflection);
    assert_eq!(temperature.celsius, 30.0);
}

#[test_log::test]
fn blocks_are_merged() {
    let mut tag = Tag {
        text: String::from("urgent"),
        renames: 0,
    };

    // Through a shared borrow the inherent `&self` method is the one bound.
    let mut reflection = Reflection::new(&tag).unwrap();
    assert_eq!(reflection.method_names().collect::<Vec<_>>(), ["label", "width"]);
    let label = reflection.method("label").unwrap();
    assert_eq!(label.receiver(), Receiver::Shared);
    let returned = reflection.must_call("label", args![]);
    assert_eq!(returned[0].downcast_ref::<String>().unwrap(), "urgent");
    drop(reflection);

    // Through an exclusive borrow the trait's `&mut self` method replaces it in place.
    let mut reflection = Reflection::new(&mut tag).unwrap();
    assert_eq!(reflection.method_names().collect::<Vec<_>>(), ["label", "width"]);
    let label = reflection.method("label").unwrap();
    assert_eq!(label.receiver(), Receiver::Exclusive);
    assert_eq!(label.signature(), "fn(&mut self) -> String");
    assert!(label.is_exported());
    let returned = reflection.must_call("label", args![]);
    assert_eq!(returned[0].downcast_ref::<String>().unwrap(), "urgent #1");
    let returned = reflection.must_call("width", args![]);
    assert_eq!(returned[0].downcast_ref::<usize>(), Some(&6));
    drop(reflection);

    assert_eq!(tag.renames, 1);
}

#[test_log::test]
fn records_without_methods() {
    let config = Config { step: 1 };
    let mut reflection = Reflection::new(&config).unwrap();
    assert_eq!(reflection.methods().count(), 0);
    assert!(reflection.call("step", args![]).is_err());
}

mod renamed_crate {
    use zreflect as zr;

    #[derive(Clone, zr::Reflect)]
    #[zreflect(crate = "zr", methods)]
    pub struct Switch {
        pub on: bool,
    }

    #[zr::methods(crate = "zr")]
    impl Switch {
        pub fn toggle(&mut self) -> bool {
            self.on = !self.on;
            self.on
        }
    }

    #[test]
    fn crate_path() {
        let mut switch = Switch { on: false };
        let mut reflection = zr::Reflection::new(&mut switch).unwrap();
        let returned = reflection.must_call("toggle", zr::args![]);
        assert_eq!(returned[0].downcast_ref(), Some(&true));
        drop(reflection);
        assert!(switch.on);
    }
}

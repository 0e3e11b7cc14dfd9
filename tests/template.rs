//! Tests for RFC 6570 template expansion.
//!
//! The expansion tables follow the examples of RFC 6570 sections 1.2 and
//! 3.2 (levels 1 through 4), against the variables defined there.

use uri_value::template::{Template, Value, VariableBag};

/// Builds the RFC 6570 section 3.2 variable set.
fn rfc_variables() -> VariableBag {
    let mut bag = VariableBag::new();
    bag.assign("count", vec!["one", "two", "three"]).unwrap();
    bag.assign("dom", vec!["example", "com"]).unwrap();
    bag.assign("dub", "me/too").unwrap();
    bag.assign("hello", "Hello World!").unwrap();
    bag.assign("half", "50%").unwrap();
    bag.assign("var", "value").unwrap();
    bag.assign("who", "fred").unwrap();
    bag.assign("base", "http://example.com/home/").unwrap();
    bag.assign("path", "/foo/bar").unwrap();
    bag.assign("list", vec!["red", "green", "blue"]).unwrap();
    bag.assign(
        "keys",
        Value::assoc([("semi", ";"), ("dot", "."), ("comma", ",")]),
    )
    .unwrap();
    bag.assign("v", "6").unwrap();
    bag.assign("x", "1024").unwrap();
    bag.assign("y", "768").unwrap();
    bag.assign("empty", "").unwrap();
    bag.assign("empty_keys", Value::Assoc(Vec::new())).unwrap();
    bag.assign("undef", Value::Undefined).unwrap();
    bag
}

/// `(template, expansion)` pairs from RFC 6570.
const TEST_CASES: &[(&str, &str)] = &[
    // Level 1-2 (sections 1.2, 3.2.2, 3.2.3).
    ("{var}", "value"),
    ("{hello}", "Hello%20World%21"),
    ("{half}", "50%25"),
    ("O{empty}X", "OX"),
    ("O{undef}X", "OX"),
    ("{x,y}", "1024,768"),
    ("{x,hello,y}", "1024,Hello%20World%21,768"),
    ("?{x,empty}", "?1024,"),
    ("?{x,undef}", "?1024"),
    ("?{undef,y}", "?768"),
    ("{+var}", "value"),
    ("{+hello}", "Hello%20World!"),
    ("{+half}", "50%25"),
    ("{base}index", "http%3A%2F%2Fexample.com%2Fhome%2Findex"),
    ("{+base}index", "http://example.com/home/index"),
    ("O{+empty}X", "OX"),
    ("O{+undef}X", "OX"),
    ("{+path}/here", "/foo/bar/here"),
    ("here?ref={+path}", "here?ref=/foo/bar"),
    ("up{+path}{var}/here", "up/foo/barvalue/here"),
    ("{+x,hello,y}", "1024,Hello%20World!,768"),
    ("{+path,x}/here", "/foo/bar,1024/here"),
    ("{#var}", "#value"),
    ("{#hello}", "#Hello%20World!"),
    ("{#half}", "#50%25"),
    ("foo{#empty}", "foo#"),
    ("foo{#undef}", "foo"),
    ("{#x,hello,y}", "#1024,Hello%20World!,768"),
    ("{#path,x}/here", "#/foo/bar,1024/here"),
    // Level 3 (section 3.2.5 through 3.2.9).
    ("{.who}", ".fred"),
    ("{.who,who}", ".fred.fred"),
    ("{.half,who}", ".50%25.fred"),
    ("X{.var}", "X.value"),
    ("X{.empty}", "X."),
    ("X{.undef}", "X"),
    ("{/who}", "/fred"),
    ("{/who,who}", "/fred/fred"),
    ("{/half,who}", "/50%25/fred"),
    ("{/who,dub}", "/fred/me%2Ftoo"),
    ("{/var}", "/value"),
    ("{/var,empty}", "/value/"),
    ("{/var,undef}", "/value"),
    ("{/var,x}/here", "/value/1024/here"),
    ("{;who}", ";who=fred"),
    ("{;half}", ";half=50%25"),
    ("{;empty}", ";empty"),
    ("{;v,empty,who}", ";v=6;empty;who=fred"),
    ("{;v,bar,who}", ";v=6;who=fred"),
    ("{;x,y}", ";x=1024;y=768"),
    ("{;x,y,empty}", ";x=1024;y=768;empty"),
    ("{;x,y,undef}", ";x=1024;y=768"),
    ("{?who}", "?who=fred"),
    ("{?half}", "?half=50%25"),
    ("{?x,y}", "?x=1024&y=768"),
    ("{?x,y,empty}", "?x=1024&y=768&empty="),
    ("{?x,y,undef}", "?x=1024&y=768"),
    ("{&who}", "&who=fred"),
    ("{&half}", "&half=50%25"),
    ("?fixed=yes{&x}", "?fixed=yes&x=1024"),
    ("{&x,y,empty}", "&x=1024&y=768&empty="),
    ("{&x,y,undef}", "&x=1024&y=768"),
    // Level 4: prefix modifiers (section 3.2.x `:N`).
    ("{var:3}", "val"),
    ("{var:30}", "value"),
    ("{+path:6}/here", "/foo/b/here"),
    ("{#path:6}/here", "#/foo/b/here"),
    ("X{.var:3}", "X.val"),
    ("{/var:1,var}", "/v/value"),
    ("{;hello:5}", ";hello=Hello"),
    ("{?var:3}", "?var=val"),
    ("{&var:3}", "&var=val"),
    // Level 4: composite values.
    ("{list}", "red,green,blue"),
    ("{list*}", "red,green,blue"),
    ("{keys}", "semi,%3B,dot,.,comma,%2C"),
    ("{keys*}", "semi=%3B,dot=.,comma=%2C"),
    ("{+list}", "red,green,blue"),
    ("{+list*}", "red,green,blue"),
    ("{+keys}", "semi,;,dot,.,comma,,"),
    ("{+keys*}", "semi=;,dot=.,comma=,"),
    ("{#list}", "#red,green,blue"),
    ("{#list*}", "#red,green,blue"),
    ("{#keys}", "#semi,;,dot,.,comma,,"),
    ("{#keys*}", "#semi=;,dot=.,comma=,"),
    ("www{.dom*}", "www.example.com"),
    ("X{.list}", "X.red,green,blue"),
    ("X{.list*}", "X.red.green.blue"),
    ("X{.keys}", "X.semi,%3B,dot,.,comma,%2C"),
    ("X{.keys*}", "X.semi=%3B.dot=..comma=%2C"),
    ("X{.empty_keys}", "X"),
    ("X{.empty_keys*}", "X"),
    ("{/list}", "/red,green,blue"),
    ("{/list*}", "/red/green/blue"),
    ("{/list*,path:4}", "/red/green/blue/%2Ffoo"),
    ("{/keys}", "/semi,%3B,dot,.,comma,%2C"),
    ("{/keys*}", "/semi=%3B/dot=./comma=%2C"),
    ("{;list}", ";list=red,green,blue"),
    ("{;list*}", ";list=red;list=green;list=blue"),
    ("{;keys}", ";keys=semi,%3B,dot,.,comma,%2C"),
    ("{;keys*}", ";semi=%3B;dot=.;comma=%2C"),
    ("{?list}", "?list=red,green,blue"),
    ("{?list*}", "?list=red&list=green&list=blue"),
    ("{?keys}", "?keys=semi,%3B,dot,.,comma,%2C"),
    ("{?keys*}", "?semi=%3B&dot=.&comma=%2C"),
    ("{&list}", "&list=red,green,blue"),
    ("{&list*}", "&list=red&list=green&list=blue"),
    ("{&keys}", "&keys=semi,%3B,dot,.,comma,%2C"),
    ("{&keys*}", "&semi=%3B&dot=.&comma=%2C"),
];

#[test]
fn rfc6570_expansion() {
    let bag = rfc_variables();
    for (template, expected) in TEST_CASES {
        let template = Template::parse(template).expect("should be a valid template");
        let expanded = template.expand(&bag).expect("should expand");
        assert_eq!(expanded, *expected, "template={:?}", template.as_str());
    }
}

#[test]
fn variable_names_are_ordered_and_unique() {
    let template = Template::parse("{count}{/count,list}{?list,keys:4}{&count}").expect("valid");
    assert_eq!(template.variable_names(), ["count", "list", "keys"]);
}

#[test]
fn unbound_variables_contribute_nothing() {
    let bag = rfc_variables();
    let with_unbound = Template::parse("{;v,bar,who}{?nope}").expect("valid");
    assert_eq!(
        with_unbound.expand(&bag).expect("expands"),
        ";v=6;who=fred"
    );
    assert_eq!(with_unbound.variable_names(), ["v", "bar", "who", "nope"]);
}

#[test]
fn prefix_on_composite_values_is_an_expansion_error() {
    let bag = rfc_variables();
    for template in ["{list:3}", "{keys:3}", "{?list:1}"] {
        let template = Template::parse(template).expect("parse is fine");
        assert!(template.expand(&bag).is_err(), "template={:?}", template.as_str());
    }
}

#[test]
fn non_string_scalars_normalize_on_insert() {
    let mut bag = VariableBag::new();
    bag.assign("b", true).unwrap();
    bag.assign("n", 42).unwrap();
    bag.assign("f", 1.5).unwrap();
    bag.assign("list", vec![Value::from(1), Value::from(false)])
        .unwrap();
    let template = Template::parse("{b,n,f}{/list*}").expect("valid");
    assert_eq!(template.expand(&bag).expect("expands"), "1,42,1.5/1/0");
}

#[test]
fn nested_sequences_are_rejected_at_assignment() {
    let mut bag = VariableBag::new();
    assert!(bag.assign("bad", vec![vec!["x"]]).is_err());
    assert!(bag
        .assign("bad", Value::assoc([("k", Value::List(vec![]))]))
        .is_err());
}

#[test]
fn literals_are_encoded_on_expansion() {
    let bag = VariableBag::new();
    let template = Template::parse("/caf\u{E9}?x=%2f").expect("valid");
    assert_eq!(template.expand(&bag).expect("expands"), "/caf%C3%A9?x=%2F");
}

#[test]
fn undefined_only_expressions_vanish() {
    let bag = VariableBag::new();
    for (template, expected) in [
        ("{?a,b,c}", ""),
        ("x{#missing}", "x"),
        ("{/nothing*}", ""),
    ] {
        let template = Template::parse(template).expect("valid");
        assert_eq!(template.expand(&bag).expect("expands"), expected);
    }
}

#[test]
fn expansion_output_parses_as_a_uri_reference() {
    let mut bag = VariableBag::new();
    bag.assign("q", "a b&c=d").unwrap();
    bag.assign("seg", "x/y").unwrap();
    let template = Template::parse("http://example.com/{seg}{?q}").expect("valid");
    let expanded = template.expand(&bag).expect("expands");
    assert_eq!(expanded, "http://example.com/x%2Fy?q=a%20b%26c%3Dd");
    assert!(uri_value::Uri::parse(&expanded).is_ok());
}

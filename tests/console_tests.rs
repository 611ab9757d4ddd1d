//! Integration tests for the command console

use hbnb::{ClassName, Console, Control, FileStorage, Storage, Value};
use tempfile::TempDir;

struct Session {
    _dir: TempDir,
    console: Console<FileStorage, Vec<u8>>,
}

impl Session {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().join("file.json")).unwrap();
        Self {
            console: Console::new(storage, Vec::new()),
            _dir: dir,
        }
    }

    /// Run one line and return everything it printed.
    fn cmd(&mut self, line: &str) -> String {
        let before = self.console.output().len();
        self.console.onecmd(line).unwrap();
        String::from_utf8(self.console.output()[before..].to_vec()).unwrap()
    }

    fn create(&mut self, class: &str) -> String {
        self.cmd(&format!("create {}", class)).trim().to_string()
    }

    fn storage(&self) -> &FileStorage {
        self.console.storage()
    }
}

const CLASSES: [&str; 7] = ["BaseModel", "User", "State", "City", "Amenity", "Place", "Review"];

// ============================================================================
// Control commands
// ============================================================================

#[test]
fn test_quit_and_eof_print_nothing() {
    let mut s = Session::new();
    assert_eq!(s.console.onecmd("quit").unwrap(), Control::Exit);
    assert_eq!(s.console.onecmd("EOF").unwrap(), Control::Exit);
    assert_eq!(s.cmd(""), "");
    assert_eq!(s.cmd("    "), "");
}

#[test]
fn test_help() {
    let mut s = Session::new();
    assert_eq!(s.cmd("help quit").trim(), "Exit the program");
    assert_eq!(s.cmd("help nothing").trim(), "*** No help on nothing");

    let overview = s.cmd("help");
    for command in ["EOF", "all", "count", "create", "destroy", "quit", "show", "update"] {
        assert!(overview.contains(command), "missing {}", command);
    }
}

#[test]
fn test_unknown_syntax() {
    let mut s = Session::new();
    assert_eq!(s.cmd("fly User"), "*** Unknown syntax: fly User\n");
    assert_eq!(s.cmd("User.fly()"), "*** Unknown syntax: User.fly()\n");
    assert_eq!(s.cmd("User.all"), "*** Unknown syntax: User.all\n");
    assert_eq!(s.cmd("User.create()"), "*** Unknown syntax: User.create()\n");
}

// ============================================================================
// create
// ============================================================================

#[test]
fn test_create_errors() {
    let mut s = Session::new();
    assert_eq!(s.cmd("create").trim(), "** class name missing **");
    assert_eq!(s.cmd("create NoClass").trim(), "** class doesn't exist **");
    assert!(s.storage().is_empty());
}

#[test]
fn test_create_every_class_then_show() {
    let mut s = Session::new();
    for class in CLASSES {
        let id = s.create(class);
        assert!(!id.is_empty());

        let shown = s.cmd(&format!("show {} {}", class, id));
        let parsed: ClassName = class.parse().unwrap();
        let record = s.storage().get(parsed, &id).unwrap();
        assert_eq!(shown.trim(), record.to_string());
        assert!(shown.starts_with(&format!("[{}] ({})", class, id)));
    }
}

#[test]
fn test_create_persists_immediately() {
    let mut s = Session::new();
    let id = s.create("User");
    let reloaded = FileStorage::open(s.storage().path()).unwrap();
    assert!(reloaded.get(ClassName::User, &id).is_some());
}

#[test]
fn test_sequential_creates_are_distinct() {
    let mut s = Session::new();
    let a = s.create("BaseModel");
    let b = s.create("BaseModel");
    assert_ne!(a, b);
    assert_ne!(
        s.storage().get(ClassName::BaseModel, &a),
        s.storage().get(ClassName::BaseModel, &b)
    );
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_errors() {
    let mut s = Session::new();
    assert_eq!(s.cmd("show").trim(), "** class name missing **");
    assert_eq!(s.cmd("show InvalidClass").trim(), "** class doesn't exist **");
    assert_eq!(s.cmd("show User").trim(), "** instance id missing **");
    assert_eq!(s.cmd("show User 8747839280").trim(), "** no instance found **");
}

#[test]
fn test_show_wrong_class_for_id() {
    let mut s = Session::new();
    let id = s.create("User");
    assert_eq!(s.cmd(&format!("show Place {}", id)).trim(), "** no instance found **");
}

#[test]
fn test_dotted_show() {
    let mut s = Session::new();
    let first = s.create("City");
    let second = s.create("City");

    let out = s.cmd(&format!("City.show({})", first));
    assert!(out.contains(&first));
    assert!(!out.contains(&second));

    let out = s.cmd(&format!("City.show(\"{}\")", second));
    assert!(out.contains(&second));

    assert_eq!(s.cmd("City.show()").trim(), "** instance id missing **");
    assert_eq!(s.cmd("Nowhere.show(1)").trim(), "** class doesn't exist **");
}

// ============================================================================
// all / count
// ============================================================================

#[test]
fn test_all_empty_store() {
    let mut s = Session::new();
    assert_eq!(s.cmd("all"), "[]\n");
    assert_eq!(s.cmd("all User"), "[]\n");
    assert_eq!(s.cmd("all InvalidClass").trim(), "** class doesn't exist **");
}

#[test]
fn test_all_filters_by_class() {
    let mut s = Session::new();
    let base1 = s.create("BaseModel");
    let base2 = s.create("BaseModel");
    let user = s.create("User");

    for line in ["all BaseModel", "BaseModel.all()"] {
        let out = s.cmd(line);
        let items: Vec<String> = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(out.contains(&base1));
        assert!(out.contains(&base2));
        assert!(!out.contains(&user));
    }

    let items: Vec<String> = serde_json::from_str(s.cmd("all").trim()).unwrap();
    assert_eq!(items.len(), 3);
}

#[test]
fn test_all_length_is_sum_of_counts() {
    let mut s = Session::new();
    for (i, class) in CLASSES.iter().enumerate() {
        for _ in 0..=i {
            s.create(class);
        }
    }

    let items: Vec<String> = serde_json::from_str(s.cmd("all").trim()).unwrap();
    let total: usize = CLASSES
        .iter()
        .map(|class| s.cmd(&format!("count {}", class)).trim().parse::<usize>().unwrap())
        .sum();
    assert_eq!(items.len(), total);
    assert_eq!(total, 28);
}

#[test]
fn test_count_tracks_create_and_destroy() {
    let mut s = Session::new();
    assert_eq!(s.cmd("Place.count()").trim(), "0");
    let a = s.create("Place");
    s.create("Place");
    s.create("Review");
    assert_eq!(s.cmd("Place.count()").trim(), "2");
    assert_eq!(s.cmd("count Place").trim(), "2");

    assert_eq!(s.cmd(&format!("destroy Place {}", a)), "");
    assert_eq!(s.cmd("count Place").trim(), "1");
    assert_eq!(s.cmd("count Review").trim(), "1");
}

#[test]
fn test_count_errors() {
    let mut s = Session::new();
    assert_eq!(s.cmd("NoSuchClass.count()").trim(), "** class doesn't exist **");
    assert_eq!(s.cmd("count").trim(), "** class name missing **");
}

// ============================================================================
// destroy
// ============================================================================

#[test]
fn test_destroy_errors() {
    let mut s = Session::new();
    assert_eq!(s.cmd("destroy").trim(), "** class name missing **");
    assert_eq!(s.cmd("destroy Ghost").trim(), "** class doesn't exist **");
    assert_eq!(s.cmd("destroy User").trim(), "** instance id missing **");
    assert_eq!(s.cmd("destroy User 1234").trim(), "** no instance found **");
    assert_eq!(s.cmd("User.destroy(1234)").trim(), "** no instance found **");
}

#[test]
fn test_destroy_removes_from_file() {
    let mut s = Session::new();
    let id = s.create("Amenity");
    s.cmd(&format!("Amenity.destroy(\"{}\")", id));

    assert_eq!(s.cmd(&format!("show Amenity {}", id)).trim(), "** no instance found **");
    let reloaded = FileStorage::open(s.storage().path()).unwrap();
    assert!(reloaded.is_empty());
}

// ============================================================================
// update
// ============================================================================

#[test]
fn test_update_errors() {
    let mut s = Session::new();
    assert_eq!(s.cmd("update").trim(), "** class name missing **");
    assert_eq!(s.cmd("update Ghost").trim(), "** class doesn't exist **");
    assert_eq!(s.cmd("update User").trim(), "** instance id missing **");
    assert_eq!(s.cmd("update User 1234").trim(), "** no instance found **");

    let id = s.create("User");
    assert_eq!(s.cmd(&format!("update User {}", id)).trim(), "** attribute name missing **");
    assert_eq!(
        s.cmd(&format!("update User {} first_name", id)).trim(),
        "** value missing **"
    );
}

#[test]
fn test_update_sets_attribute_and_refreshes_timestamp() {
    let mut s = Session::new();
    let id = s.create("User");
    let before = s.storage().get(ClassName::User, &id).unwrap().updated_at();

    assert_eq!(s.cmd(&format!("update User {} first_name \"Betty Bar\"", id)), "");
    let record = s.storage().get(ClassName::User, &id).unwrap();
    assert_eq!(record.get("first_name"), Some(&Value::from("Betty Bar")));
    assert!(record.updated_at() >= before);
    assert!(record.updated_at() >= record.created_at());

    let shown = s.cmd(&format!("show User {}", id));
    assert!(shown.contains("'first_name': 'Betty Bar'"));
}

#[test]
fn test_update_applies_pairs_before_reporting_missing_value() {
    let mut s = Session::new();
    let id = s.create("Place");
    let out = s.cmd(&format!("update Place {} name Loft number_rooms 3 latitude", id));
    assert_eq!(out.trim(), "** value missing **");

    let record = s.storage().get(ClassName::Place, &id).unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("Loft")));
    assert_eq!(record.get("number_rooms"), Some(&Value::Integer(3)));
    assert!(record.get("latitude").is_none());
}

#[test]
fn test_update_uses_schema_types() {
    let mut s = Session::new();
    let id = s.create("Place");
    s.cmd(&format!("update Place {} max_guest \"4\"", id));
    s.cmd(&format!("update Place {} longitude 3", id));
    s.cmd(&format!("update Place {} free_form 7", id));

    let record = s.storage().get(ClassName::Place, &id).unwrap();
    assert_eq!(record.get("max_guest"), Some(&Value::Integer(4)));
    assert_eq!(record.get("longitude"), Some(&Value::Float(3.0)));
    assert_eq!(record.get("free_form"), Some(&Value::Integer(7)));
}

#[test]
fn test_update_dotted_forms() {
    let mut s = Session::new();
    let id = s.create("User");

    assert_eq!(s.cmd(&format!("User.update(\"{}\", \"email\", \"a@b.io\")", id)), "");
    assert_eq!(
        s.cmd(&format!("User.update(\"{}\", {{'first_name': \"John\", \"age\": 89}})", id)),
        ""
    );

    let record = s.storage().get(ClassName::User, &id).unwrap();
    assert_eq!(record.get("email"), Some(&Value::from("a@b.io")));
    assert_eq!(record.get("first_name"), Some(&Value::from("John")));
    assert_eq!(record.get("age"), Some(&Value::Integer(89)));
}

#[test]
fn test_update_ignores_protected_attributes() {
    let mut s = Session::new();
    let id = s.create("State");
    s.cmd(&format!("update State {} id hijacked", id));
    s.cmd(&format!("update State {} created_at yesterday", id));

    assert!(s.storage().get(ClassName::State, &id).is_some());
    assert!(s.storage().get(ClassName::State, "hijacked").is_none());
}

#[test]
fn test_update_survives_reload() {
    let mut s = Session::new();
    let id = s.create("Review");
    s.cmd(&format!("update Review {} text \"Great stay\"", id));

    let reloaded = FileStorage::open(s.storage().path()).unwrap();
    assert_eq!(
        reloaded.get(ClassName::Review, &id).unwrap().get("text"),
        Some(&Value::from("Great stay"))
    );
}

// ============================================================================
// Read loop
// ============================================================================

#[test]
fn test_batch_session() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::open(dir.path().join("file.json")).unwrap();
    let mut console = Console::new(storage, Vec::new());

    console
        .run("create State\n\nState.count()\nbogus\nquit\nall\n".as_bytes())
        .unwrap();

    let (storage, out) = console.into_parts();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(storage.count(ClassName::State), 1);
    assert_eq!(lines[1], "1");
    assert_eq!(lines[2], "*** Unknown syntax: bogus");
}

#[test]
fn test_session_continues_across_restarts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("file.json");

    let id = {
        let mut console = Console::new(FileStorage::open(&path).unwrap(), Vec::new());
        console.run("create City\n".as_bytes()).unwrap();
        let (_, out) = console.into_parts();
        String::from_utf8(out).unwrap().trim().to_string()
    };

    let mut console = Console::new(FileStorage::open(&path).unwrap(), Vec::new());
    console.run(format!("show City {}\n", id).as_bytes()).unwrap();
    let (_, out) = console.into_parts();
    assert!(String::from_utf8(out).unwrap().starts_with(&format!("[City] ({})", id)));
}

#[test]
fn test_update_mapping_escaped_quote_in_double_quotes() {
    let mut s = Session::new();
    let id = s.create("Place");
    assert_eq!(
        s.cmd(&format!(r#"Place.update("{}", {{"name": "O\'Hare"}})"#, id)),
        ""
    );
    let record = s.storage().get(ClassName::Place, &id).unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("O'Hare")));
}

#[test]
fn test_update_malformed_mapping_on_unknown_class() {
    let mut s = Session::new();
    assert_eq!(s.cmd("update NoSuchClass 1 {'a': }").trim(), "** class doesn't exist **");
    assert_eq!(
        s.cmd("NoSuchClass.update(\"1\", {'a': })").trim(),
        "** class doesn't exist **"
    );
}

/// `(command, one-line description)` for every documented command.
pub const TOPICS: [(&str, &str); 9] = [
    ("EOF", "Exit the program"),
    ("all", "Prints all instances as strings, optionally only those of one class: all [<class>]"),
    ("count", "Prints the number of instances of a class: count <class>"),
    ("create", "Creates an instance of a class, saves it and prints its id: create <class>"),
    ("destroy", "Deletes an instance by class name and id: destroy <class> <id>"),
    ("help", "Lists documented commands, or describes one: help [<command>]"),
    ("quit", "Exit the program"),
    ("show", "Prints an instance as a string by class name and id: show <class> <id>"),
    (
        "update",
        "Sets attributes on an instance: update <class> <id> <attribute> <value> | update <class> <id> <mapping>",
    ),
];

const HEADER: &str = "Documented commands (type help <topic>):";

pub fn describe(topic: &str) -> Option<&'static str> {
    TOPICS
        .iter()
        .find(|(name, _)| *name == topic)
        .map(|(_, text)| *text)
}

/// Header, rule, then the command names on one line.
pub fn overview() -> String {
    let names: Vec<&str> = TOPICS.iter().map(|(name, _)| *name).collect();
    format!("{}\n{}\n{}", HEADER, "=".repeat(HEADER.len()), names.join("  "))
}

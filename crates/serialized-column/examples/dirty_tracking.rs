//! Walks a record's serialized attributes through load, mutation and save.
//!
//! Run with `RUST_LOG=serialized_column=trace` to see the adapter's decisions.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serialized_column::{
    BinaryColumn, ColumnSerializer, JsonCoder, ObjectClass, Payload, Serialized, StoreCoder,
    TextColumn, TypedJsonCoder, ZstdCoder,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    display_name: String,
    languages: Vec<String>,
}

fn show(label: &str, payload: Option<&Payload>) {
    match payload {
        None => println!("{label}: <no payload>"),
        Some(Payload::Text { data, encoding }) => {
            println!("{label}: text ({}) {data}", encoding.name())
        }
        Some(Payload::Binary(bytes)) => println!("{label}: binary [{} bytes]", bytes.len()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A keyed settings store in a text column
    let settings = Serialized::new(TextColumn::new(), StoreCoder::json());

    println!("=== settings ===");
    let mut value = settings.deserialize(None).expect("absent column always decodes");
    println!("fresh record: {value}");
    show("untouched default", settings.serialize(Some(&value)).unwrap().as_ref());

    settings.accessor().write(&mut value, "theme", json!("dark"));
    let stored = settings.serialize(Some(&value)).expect("settings encode");
    show("after first save", stored.as_ref());

    let mut reloaded = settings.deserialize(stored.as_ref()).expect("settings decode");
    println!(
        "dirty right after reload: {}",
        settings.changed_in_place(stored.as_ref(), Some(&reloaded)).unwrap()
    );
    settings.accessor().write(&mut reloaded, "theme", json!("light"));
    println!(
        "dirty after in-place write: {}",
        settings.changed_in_place(stored.as_ref(), Some(&reloaded)).unwrap()
    );

    // A typed profile, compressed into a binary column
    println!("\n=== profile ===");
    let profile = Serialized::new(
        BinaryColumn::new(),
        ZstdCoder::new(TypedJsonCoder::<Profile>::new()),
    );
    let mut current = Profile {
        display_name: "Ada".to_string(),
        languages: (0..20).map(|i| format!("lang-{i}")).collect(),
    };
    let stored = profile.serialize(Some(&current)).expect("profile encode");
    show("stored profile", stored.as_ref());
    println!("force equality: {}", profile.force_equality(&current));

    current.languages.push("rust".to_string());
    println!(
        "dirty after push: {}",
        profile.changed_in_place(stored.as_ref(), Some(&current)).unwrap()
    );

    // Type-checked serializer rejects the wrong shape
    println!("\n=== tags ===");
    let tags = Serialized::new(
        TextColumn::new(),
        ColumnSerializer::new("tags", JsonCoder).with_object_class(ObjectClass::json_array()),
    );
    match tags.assert_valid_value(&json!({"not": "a list"})) {
        Ok(()) => println!("accepted"),
        Err(e) => println!("rejected: {e}"),
    }
    show("empty tags", tags.serialize(Some(&json!([]))).unwrap().as_ref());
}

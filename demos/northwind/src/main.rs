//! Northwind Example
//!
//! Demonstrates the two dynamic objects of dynproxy:
//! a nested property bag with conversion on read, and the database proxy
//! chain resolving tables and stored procedures at call time.
//!
//! Run with an optional config file:
//! `cargo run -p northwind -- demos/northwind/northwind.config.ron`

use dynproxy_core::{Dispatch, PropertyBag, Value, ValueType};
use dynproxy_db::{adapter::positional, DatabaseProxy, Member, StoreConfig};
use std::error::Error;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== dynproxy Northwind Example ===\n");

    property_bag()?;

    let config = match std::env::args().nth(1) {
        Some(file) => StoreConfig::load_file(file)?,
        None => StoreConfig::load_file(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("northwind.config.ron"),
        )?,
    };
    let store = dynproxy_script::open_store(&config)?;
    let context = DatabaseProxy::new(&store);

    customers(&context)?;
    fully_dynamic(&context)?;
    failures(&context);

    Ok(())
}

fn property_bag() -> Result<(), Box<dyn Error>> {
    let mut person = PropertyBag::object();
    person.resolve_set("Name", "Chad".into())?;
    let address = person.set("Address", PropertyBag::object());
    address.resolve_set("Street", "967 Dorothy St".into())?;
    address.resolve_set("City", "Regina".into())?;

    let street = person.path(&["Address", "Street"])?;
    let city = person.path(&["Address", "City"])?;
    println!("{}", street.resolve_convert(ValueType::String)?);
    println!("{}", city.resolve_convert(ValueType::String)?);
    println!("{}", person.resolve_get("Name")?.resolve_convert(ValueType::String)?);

    // converting the object node itself has no value to convert
    if let Err(e) = person.resolve_convert(ValueType::String) {
        println!("({})", e);
    }

    // a leaf written below becomes an object and loses its value
    let mut other = PropertyBag::object();
    other.resolve_set("Address", "967 Dorothy St".into())?;
    println!("{}", other.resolve_get("Address")?.resolve_convert(ValueType::String)?);
    other.get_mut("Address")?.resolve_set("City", "Regina".into())?;
    let address = other.resolve_get("Address")?;
    println!("{}", address.path(&["City"])?.resolve_convert(ValueType::String)?);
    if let Err(e) = address.resolve_convert(ValueType::String) {
        println!("(Address is now an object: {})", e);
    }
    println!();
    Ok(())
}

fn customers(context: &DatabaseProxy<'_>) -> Result<(), Box<dyn Error>> {
    let customers = context.table("Customers")?;

    let result = customers.invoke("SelectAll", &[])?;
    println!("Found {} rows", result.count());
    for row in result.iter() {
        println!("  {} {}", row.get("CustomerID")?, row.get("CompanyName")?);
    }
    println!(
        "First company name: {}",
        result.index(&[Value::Int(0)])?.get("CompanyName")?
    );
    println!();

    let filtered = customers.invoke("SelectByID", &positional([("CustomerID", "EASTC")]))?;
    println!("Found {} rows", filtered.count());
    if filtered.count() > 0 {
        println!("Company name: {}", filtered.row(0)?.get("CompanyName")?);
    }
    println!();
    Ok(())
}

fn fully_dynamic(context: &DatabaseProxy<'_>) -> Result<(), Box<dyn Error>> {
    let shippers = context.resolve_get("Shippers")?;
    shippers.resolve_invoke(
        "Insert",
        &[Value::Int(4), "Northwind Freight".into(), Value::Null],
    )?;

    let all = shippers.resolve_invoke("SelectAll", &[])?;
    let count = all.resolve_get("Count")?.resolve_convert(ValueType::Int)?;
    println!("Shippers: {}", count);

    let last = count.as_int().unwrap_or(0) - 1;
    let row: Member<'_> = all.resolve_index(&[Value::Int(last)])?;
    println!(
        "Newest shipper: {}",
        row.resolve_get("CompanyName")?.resolve_convert(ValueType::String)?
    );
    println!();
    Ok(())
}

fn failures(context: &DatabaseProxy<'_>) {
    if let Err(e) = context.table("NoSuchTable") {
        println!("{}", e);
    }
    if let Ok(customers) = context.table("Customers") {
        if let Err(e) = customers.invoke("SelectByID", &[]) {
            println!("{}", e);
        }
        if let Err(e) = customers.invoke("Truncate", &[]) {
            println!("{}", e);
        }
        if let Ok(result) = customers.invoke("SelectAll", &[]) {
            if let Err(e) = result.index(&[Value::Int(1), Value::Int(2)]) {
                println!("{}", e);
            }
            if let Err(e) = result.index(&[Value::Int(10)]) {
                println!("{}", e);
            }
            if let Ok(row) = result.row(0) {
                if let Err(e) = row.get("Fax") {
                    println!("{}", e);
                }
            }
        }
    }
}

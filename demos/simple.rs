use radix_dict::{RadixMap, Result};

fn main() -> Result<()> {
    let mut map: RadixMap<u64> = RadixMap::case_insensitive();

    map.add("abc", 123)?;
    map.add("def", 456)?;
    map.add("defghi", 789)?;

    assert_eq!(map.try_get("ABC")?.copied(), Some(123));
    assert_eq!(map.try_get("abcdef")?.copied(), None);
    assert_eq!(map.try_get("ab")?.copied(), None);

    for (key, value) in map.prefix_iter("De")? {
        println!("{key} => {value}");
    }

    Ok(())
}

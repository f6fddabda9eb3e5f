use flatsource::Populate;

#[derive(Clone, Debug, Default, Populate)]
struct Demo {
	name: String,
	port: u16,
}

fn main() {
	let mut demo = Demo {
		name: "yes".to_string(),
		port: 80,
	};
	println!("{demo:?}");
	flatsource::populate_prefixed(&mut demo, &flatsource::ProcessEnvironment, "demo").unwrap();
	println!("{demo:?}");
}

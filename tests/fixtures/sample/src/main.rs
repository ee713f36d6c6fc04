fn main() {
    println!("sample");
}

fn main() {
    guikit::app::startup::startup();
}

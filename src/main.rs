fn main() {
    teamhub_app_lib::run()
}

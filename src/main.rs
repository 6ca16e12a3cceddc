fn main() {
    activity_board::run();
}

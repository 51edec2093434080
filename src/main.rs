// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Penline: replay a gesture script and print the saved paths

fn main() -> anyhow::Result<()> {
    penline::run()
}

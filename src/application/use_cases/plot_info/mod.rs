pub mod manage_plot_info;
